// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use postboard::api::router;
use postboard::auth::{Credentials, TokenService};
use postboard::config::{Config, LogFormat};
use postboard::state::AppState;
use postboard::storage::Database;

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Invalid configuration");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let db = Database::open(&config.data_dir.join("postboard.redb"))
        .expect("Failed to open database");
    let tokens = TokenService::new(config.token_secret.as_bytes(), config.token_ttl);
    let credentials = Credentials::new(config.argon2_memory_kib, config.argon2_iterations)
        .expect("Invalid Argon2 parameters");

    let state = AppState::new(db, tokens, credentials);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, "postboard listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
