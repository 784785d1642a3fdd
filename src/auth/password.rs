// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! Password hashing for the credential store.
//!
//! Uses Argon2id with a per-call random salt and a configurable work
//! factor. A fast general-purpose hash would be a correctness bug here, not
//! a style choice: the cost is what resists offline brute force.

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(argon2::Error),

    #[error("failed to generate salt: {0}")]
    Salt(String),

    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),
}

/// Hashes and verifies account passwords.
#[derive(Clone)]
pub struct Credentials {
    argon2: Argon2<'static>,
    /// Hash of a throwaway password, verified when an email lookup misses
    /// so that unknown-email and wrong-password take the same time.
    dummy_hash: String,
}

impl Credentials {
    /// Build a credential hasher with the configured work factor.
    ///
    /// `memory_kib` and `iterations` come from configuration; parallelism
    /// is fixed at 1.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, CredentialError> {
        let params =
            Params::new(memory_kib, iterations, 1, None).map_err(CredentialError::InvalidParams)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let dummy_hash = hash_with(&argon2, "postboard-timing-equalizer")?;

        Ok(Self { argon2, dummy_hash })
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        hash_with(&self.argon2, password)
    }

    /// Verify a plaintext password against a stored PHC-format hash.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        if let Ok(parsed) = PasswordHash::new(stored_hash) {
            self.argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        } else {
            false
        }
    }

    /// Burn the same work as a real verification, then fail.
    ///
    /// Called when no account matches the login email, so the response
    /// timing does not reveal whether the email exists.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, CredentialError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| CredentialError::Salt(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(CredentialError::Hash)?;

    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(CredentialError::Hash)?
        .to_string();
    Ok(phc)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal work factor keeps the test suite fast.
    fn credentials() -> Credentials {
        Credentials::new(8, 1).unwrap()
    }

    #[test]
    fn verify_accepts_the_registered_password() {
        let credentials = credentials();
        let hash = credentials.hash("pw1").unwrap();

        assert!(credentials.verify("pw1", &hash));
        assert!(!credentials.verify("pw2", &hash));
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let credentials = credentials();
        let first = credentials.hash("pw1").unwrap();
        let second = credentials.hash("pw1").unwrap();

        assert_ne!(first, second);
        assert!(credentials.verify("pw1", &first));
        assert!(credentials.verify("pw1", &second));
    }

    #[test]
    fn hash_is_phc_argon2id() {
        let credentials = credentials();
        let hash = credentials.hash("pw1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn garbage_stored_hash_never_verifies() {
        let credentials = credentials();
        assert!(!credentials.verify("pw1", "not-a-phc-hash"));
    }

    #[test]
    fn dummy_verification_always_fails() {
        let credentials = credentials();
        assert!(!credentials.verify_dummy("anything"));
    }

    #[test]
    fn zero_memory_cost_is_rejected() {
        assert!(matches!(
            Credentials::new(0, 1),
            Err(CredentialError::InvalidParams(_))
        ));
    }
}
