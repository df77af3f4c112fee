//! Runtime configuration: database connection, storage layout, HTTP server.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Connection settings. Either a full URL or the discrete `POSTGRES_*` parts.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// Where the trains table lives and how its date/time columns are typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub schema: String,
    /// Always bind date/time values with `::date` / `::time` casts. When unset the
    /// server turns them on if the existing table has DATE/TIME columns.
    pub temporal_casts: bool,
    /// Create the table at startup if it is missing.
    pub ensure_table: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub max_body_bytes: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}
