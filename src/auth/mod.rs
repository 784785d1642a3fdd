// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! # Authentication Module
//!
//! Credential hashing, bearer-token issuance/verification, and the request
//! gate for the Postboard API.
//!
//! ## Auth Flow
//!
//! 1. `POST /v1/register` hashes the password (Argon2id, salted) and stores
//!    the account
//! 2. `POST /v1/login` verifies the credentials and returns an HS256-signed
//!    bearer token
//! 3. Protected requests carry `Authorization: Bearer <token>`; the
//!    middleware/extractor verifies signature and expiry and attaches the
//!    subject identity
//!
//! ## Security
//!
//! - The signing secret is injected via configuration at startup, never
//!   hardcoded
//! - Token verification is pure: no store access on the hot path
//! - Login does not reveal whether an email exists (single error, equalized
//!   timing)

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod tokens;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::require_auth;
pub use password::{CredentialError, Credentials};
pub use tokens::TokenService;
