// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user.account_id is the verified subject
//! }
//! ```
//!
//! If the `require_auth` middleware already ran, the extractor reuses the
//! identity it attached; otherwise it verifies the bearer header itself.
//! Either way a handler with `Auth` in its signature is unreachable without
//! a valid token.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::bearer_token;
use super::{AuthenticatedUser, AuthError};
use crate::state::AppState;

/// Extractor for authenticated users.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the user
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let token = bearer_token(&parts.headers)?;
        let claims = state.tokens.verify(token)?;

        Ok(Auth(AuthenticatedUser::from_claims(&claims)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, TokenService};
    use crate::storage::Database;
    use axum::http::Request;
    use chrono::Duration;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn create_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(&temp_dir.path().join("test.redb")).expect("Failed to open db");
        let tokens = TokenService::new(b"extractor-test-secret", Duration::hours(1));
        let credentials = Credentials::new(8, 1).expect("Failed to build credentials");
        (AppState::new(db, tokens, credentials), temp_dir)
    }

    fn parts_with_header(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn extractor_requires_auth_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_header(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn extractor_accepts_issued_token() {
        let (state, _temp_dir) = create_test_state();
        let subject = Uuid::new_v4();
        let token = state.tokens.issue(subject).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0.account_id, subject);
    }

    #[tokio::test]
    async fn extractor_rejects_foreign_signature() {
        let (state, _temp_dir) = create_test_state();
        let foreign = TokenService::new(b"some-other-secret", Duration::hours(1));
        let token = foreign.issue(Uuid::new_v4()).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[tokio::test]
    async fn extractor_prefers_extensions() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = parts_with_header(None);

        let subject = Uuid::new_v4();
        parts.extensions.insert(AuthenticatedUser {
            account_id: subject,
            expires_at: 0,
        });

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert_eq!(result.unwrap().0.account_id, subject);
    }
}
