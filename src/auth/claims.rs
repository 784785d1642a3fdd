// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Token claims and the authenticated identity derived from them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a Postboard bearer token.
///
/// The HS256 signature covers exactly these fields; altering any of them
/// invalidates the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account ID this token asserts
    pub sub: Uuid,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Authenticated identity attached to a request after token verification.
///
/// This is the only identity source handlers see; they never re-derive it
/// from headers themselves.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Account ID from the token's `sub` claim
    pub account_id: Uuid,
    /// Token expiration (Unix timestamp), available for logging
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            account_id: claims.sub,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_claims_extracts_subject() {
        let sub = Uuid::new_v4();
        let claims = Claims {
            sub,
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        };

        let user = AuthenticatedUser::from_claims(&claims);
        assert_eq!(user.account_id, sub);
        assert_eq!(user.expires_at, 1_700_003_600);
    }
}
