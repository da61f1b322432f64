//! API service configuration.

use std::env;

use thiserror::Error;

use common::{DatabaseConfig, JwtConfig, ServerConfig};
use domain::{
    HashCost, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_PARALLELISM,
    DEFAULT_JWT_EXPIRES_IN_SECONDS, MAX_JWT_EXPIRES_IN_SECONDS, MIN_JWT_SECRET_LENGTH,
};

/// Secret used when `JWT_SECRET` is unset in debug builds
const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Configuration loading errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("JWT_SECRET must be at least {0} characters long")]
    SecretTooShort(usize),

    #[error("PASSWORD_HASH_* settings are rejected by Argon2: {0}")]
    InvalidHashCost(String),
}

/// API service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub hash_cost: HashCost,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort(MIN_JWT_SECRET_LENGTH));
        }

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("WEB_SERVER_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "WEB_SERVER_PORT", defaults.port)?,
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or_else(|| DatabaseConfig::default().url),
            ..DatabaseConfig::default()
        };

        let expires_in = parse_or(&lookup, "JWT_EXPIRES_IN", DEFAULT_JWT_EXPIRES_IN_SECONDS)?;
        if !(1..=MAX_JWT_EXPIRES_IN_SECONDS).contains(&expires_in) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRES_IN",
                value: expires_in.to_string(),
            });
        }
        let jwt = JwtConfig::new(secret, expires_in);

        let hash_cost = HashCost::new(
            parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", DEFAULT_HASH_MEMORY_KIB)?,
            parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", DEFAULT_HASH_ITERATIONS)?,
            parse_or(&lookup, "PASSWORD_HASH_PARALLELISM", DEFAULT_HASH_PARALLELISM)?,
        );
        hash_cost
            .validate()
            .map_err(|e| ConfigError::InvalidHashCost(e.to_string()))?;

        Ok(Self {
            server,
            database,
            jwt,
            hash_cost,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[("JWT_SECRET", SECRET)])).unwrap();

        assert_eq!(config.server.addr(), "0.0.0.0:8000");
        assert_eq!(config.jwt.expires_in_seconds, 300);
        assert_eq!(config.hash_cost, HashCost::default());
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("JWT_EXPIRES_IN", "60"),
            ("WEB_SERVER_HOST", "127.0.0.1"),
            ("WEB_SERVER_PORT", "9090"),
            ("DATABASE_URL", "postgres://localhost/test"),
            ("PASSWORD_HASH_MEMORY_KIB", "4096"),
            ("PASSWORD_HASH_ITERATIONS", "3"),
            ("PASSWORD_HASH_PARALLELISM", "2"),
        ]))
        .unwrap();

        assert_eq!(config.server.addr(), "127.0.0.1:9090");
        assert_eq!(config.database.url, "postgres://localhost/test");
        assert_eq!(config.jwt.expires_in_seconds, 60);
        assert_eq!(config.hash_cost, HashCost::new(4096, 3, 2));
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let result = ApiConfig::from_lookup(lookup_from(&[("JWT_SECRET", "short")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::SecretTooShort(MIN_JWT_SECRET_LENGTH)
        );
    }

    #[test]
    fn test_token_lifetime_bounds() {
        for value in ["0", "-60", "9223372036854775807"] {
            let result = ApiConfig::from_lookup(lookup_from(&[
                ("JWT_SECRET", SECRET),
                ("JWT_EXPIRES_IN", value),
            ]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { name: "JWT_EXPIRES_IN", .. })),
                "{value}"
            );
        }

        let year = MAX_JWT_EXPIRES_IN_SECONDS.to_string();
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("JWT_EXPIRES_IN", year.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.jwt.expires_in_seconds, MAX_JWT_EXPIRES_IN_SECONDS);
    }

    #[test]
    fn test_unusable_hash_cost_is_rejected() {
        let result = ApiConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("PASSWORD_HASH_ITERATIONS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidHashCost(_))));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = ApiConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", SECRET),
            ("WEB_SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "WEB_SERVER_PORT", .. })
        ));
    }
}
