// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Postboard Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. The token
//! signing secret is mandatory: the service refuses to start without it so
//! that no build ever falls back to a hardcoded secret.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory for the embedded database | `/data` |
//! | `TOKEN_SECRET` | HS256 token signing secret | Required |
//! | `TOKEN_TTL_SECS` | Bearer token lifetime in seconds | `3600` |
//! | `ARGON2_MEMORY_KIB` | Password hash memory cost (KiB) | `19456` |
//! | `ARGON2_ITERATIONS` | Password hash time cost (passes) | `2` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;

/// Logging output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOKEN_SECRET must be set")]
    MissingTokenSecret,

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Process-wide configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub token_secret: String,
    pub token_ttl: Duration,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through an injectable lookup function.
    ///
    /// Tests use this to avoid mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token_secret = lookup("TOKEN_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingTokenSecret)?;

        let ttl_secs: i64 = parse_or(&lookup, "TOKEN_TTL_SECS", 3600)?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            data_dir: PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "/data".to_string())),
            token_secret,
            token_ttl: Duration::seconds(ttl_secs),
            argon2_memory_kib: parse_or(&lookup, "ARGON2_MEMORY_KIB", 19_456)?,
            argon2_iterations: parse_or(&lookup, "ARGON2_ITERATIONS", 2)?,
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(env: &HashMap<String, String>) -> Result<Config, ConfigError> {
        Config::from_lookup(|var| env.get(var).cloned())
    }

    #[test]
    fn missing_token_secret_is_rejected() {
        let env = env_with(&[]);
        assert!(matches!(load(&env), Err(ConfigError::MissingTokenSecret)));
    }

    #[test]
    fn empty_token_secret_is_rejected() {
        let env = env_with(&[("TOKEN_SECRET", "")]);
        assert!(matches!(load(&env), Err(ConfigError::MissingTokenSecret)));
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let env = env_with(&[("TOKEN_SECRET", "s3cret")]);
        let config = load(&env).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl, Duration::seconds(3600));
        assert_eq!(config.argon2_memory_kib, 19_456);
        assert_eq!(config.argon2_iterations, 2);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let env = env_with(&[
            ("TOKEN_SECRET", "s3cret"),
            ("PORT", "3000"),
            ("TOKEN_TTL_SECS", "60"),
            ("LOG_FORMAT", "json"),
        ]);
        let config = load(&env).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.token_ttl, Duration::seconds(60));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unparseable_port_is_rejected() {
        let env = env_with(&[("TOKEN_SECRET", "s3cret"), ("PORT", "not-a-port")]);
        assert!(matches!(
            load(&env),
            Err(ConfigError::InvalidValue { var: "PORT", .. })
        ));
    }
}
