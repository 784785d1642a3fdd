// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying `{sub, iat, exp}`. Verification is
//! pure (no store access, no I/O), which is what lets the middleware run it
//! on every request. The signing secret is process-wide configuration;
//! rotating it invalidates all outstanding tokens, and no revocation list
//! exists beyond expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::claims::Claims;
use super::AuthError;

/// Issues and verifies bearer tokens with a process-wide HS256 secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for `subject_id` with the configured lifetime.
    pub fn issue(&self, subject_id: Uuid) -> Result<String, AuthError> {
        self.issue_with_ttl(subject_id, self.ttl)
    }

    /// Issue a token with an explicit lifetime.
    pub fn issue_with_ttl(&self, subject_id: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Verify a token string and return its claims.
    ///
    /// Succeeds only if the token is structurally valid, the signature
    /// matches, and `exp` has not passed. Each failure mode keeps its own
    /// variant; none is remapped to another.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Strict expiry: a token is dead the second `exp` passes.
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            }
        })?;

        Ok(token_data.claims)
    }
}
