// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! HTTP API surface.
//!
//! Protected vs public is declared here, per route. The `/users` subtree is
//! wholly protected and wrapped by the auth middleware; the posts routes
//! mix public reads and protected mutations on the same paths, so each
//! mutation handler declares the `Auth` extractor instead. Either way a
//! protected handler is unreachable without a verified token.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    models::{
        AccountResponse, AccountWithPosts, CreatePostRequest, LoginRequest, PostResponse,
        PostWithAuthor, RegisterRequest, TokenResponse, UpdatePostRequest,
    },
    state::AppState,
};

pub mod accounts;
pub mod health;
pub mod posts;

pub fn router(state: AppState) -> Router {
    let protected_users = Router::new()
        .route("/users", get(accounts::list_users))
        .route("/users/me", get(accounts::me))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let v1_routes = Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/health", get(health::health))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{post_id}",
            put(posts::update_post).delete(posts::delete_post),
        )
        .merge(protected_users)
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::register,
        accounts::login,
        accounts::list_users,
        accounts::me,
        posts::list_posts,
        posts::create_post,
        posts::update_post,
        posts::delete_post,
        health::health
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AccountResponse,
            AccountWithPosts,
            TokenResponse,
            CreatePostRequest,
            UpdatePostRequest,
            PostResponse,
            PostWithAuthor
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Registration, login, and account listings"),
        (name = "Posts", description = "Ownership-scoped content records"),
        (name = "Health", description = "Liveness probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
