//! Checks on configuration values that cannot be expressed by parsing alone.

use crate::config::AppConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::sync::OnceLock;

/// Plain, unquoted PostgreSQL identifier (at most 63 bytes).
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("static pattern"))
}

pub fn is_identifier(s: &str) -> bool {
    identifier_pattern().is_match(s)
}

/// Validate a loaded config.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if !is_identifier(&config.storage.schema) {
        return Err(ConfigError::Invalid {
            key: "TRAINS_SCHEMA",
            reason: format!("'{}' is not a plain identifier", config.storage.schema),
        });
    }
    if config.db.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "DB_MAX_CONNECTIONS",
            reason: "must be at least 1".into(),
        });
    }
    if config.db.url.is_none() {
        if config.db.host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "POSTGRES_HOST",
                reason: "must not be empty".into(),
            });
        }
        if config.db.database.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "POSTGRES_DB",
                reason: "must not be empty".into(),
            });
        }
    }
    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "MAX_BODY_BYTES",
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}
