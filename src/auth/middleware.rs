// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Authentication middleware for Axum.
//!
//! Wraps a router subtree so that every request in it carries a verified
//! identity before any handler runs. Applied via
//! `axum::middleware::from_fn_with_state(state, require_auth)`; the `Auth`
//! extractor then picks the identity out of request extensions.
//!
//! Protected vs public is an explicit routing decision: routes inside the
//! wrapped subtree are protected, routes outside it are public. Handlers
//! additionally declare `Auth` in their signature, which re-verifies the
//! header if the subtree layer was not applied, so a protected handler is
//! never reachable unauthenticated regardless of how it is composed.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Authentication middleware function.
///
/// Rejects before the handler on any failure; on success the verified
/// identity rides along in request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = match bearer_token(request.headers()).and_then(|token| state.tokens.verify(token))
    {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from_claims(&claims));
    next.run(request).await
}
