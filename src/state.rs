// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

use std::sync::Arc;

use crate::auth::{Credentials, TokenService};
use crate::storage::Database;

/// Shared application state.
///
/// Everything in here is immutable after startup: the signing keys, the
/// hashing parameters, and the database handle (whose interior concurrency
/// is redb's concern). Handlers never share mutable in-process state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: TokenService,
    pub credentials: Credentials,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService, credentials: Credentials) -> Self {
        Self {
            db: Arc::new(db),
            tokens,
            credentials,
        }
    }
}
