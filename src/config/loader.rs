//! Load config from the process environment (after `.env`) or any key lookup.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND: ([u8; 4], u16) = ([0, 0, 0, 0], 8000);
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

impl AppConfig {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db = DbConfig {
            url: get("DATABASE_URL"),
            host: get("POSTGRES_HOST").unwrap_or_else(|| "localhost".into()),
            port: parse_or(&get, "POSTGRES_PORT", 5432u16)?,
            database: get("POSTGRES_DB").unwrap_or_else(|| "trains".into()),
            user: get("POSTGRES_USER").unwrap_or_else(|| "postgres".into()),
            password: lookup("POSTGRES_PASSWORD").unwrap_or_default(),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5u32)?,
            acquire_timeout: Duration::from_secs(parse_or(&get, "DB_ACQUIRE_TIMEOUT_SECS", 30u64)?),
        };
        let storage = StorageConfig {
            schema: get("TRAINS_SCHEMA").unwrap_or_else(|| "public".into()),
            temporal_casts: parse_bool_or(&get, "TRAINS_TEMPORAL_CASTS", false)?,
            ensure_table: parse_bool_or(&get, "TRAINS_ENSURE_TABLE", true)?,
        };
        let server = ServerConfig {
            bind: parse_or(&get, "BIND_ADDR", SocketAddr::from(DEFAULT_BIND))?,
            max_body_bytes: parse_or(&get, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        };

        let config = AppConfig { db, storage, server };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{}': {}", raw, e),
        }),
    }
}

fn parse_bool_or(get: &impl Fn(&str) -> Option<String>, key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match get(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key,
                reason: format!("'{}' is not a boolean", v),
            }),
        },
    }
}

impl DbConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
                key: "DATABASE_URL",
                reason: e.to_string(),
            });
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password))
    }

    /// Connect a pool with the configured size and acquire timeout.
    pub async fn connect(&self) -> Result<PgPool, Box<dyn std::error::Error + Send + Sync>> {
        let options = self.connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect_with(options)
            .await?;
        Ok(pool)
    }
}
