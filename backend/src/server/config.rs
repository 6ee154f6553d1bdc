//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

/// Failure while reading configuration from the environment.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The bind address could not be parsed.
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },

    /// The pool size could not be parsed.
    #[error("invalid pool size {value}: {message}")]
    InvalidPoolSize { value: String, message: String },
}

/// Runtime configuration for the HTTP server, read from the environment
/// and passed explicitly to the bootstrap.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: String,
    pool_max_size: u32,
}

impl ServerConfig {
    /// Default SQLite database file, matching the historical deployment.
    pub const DEFAULT_DATABASE_URL: &'static str = "db.sqlite3";

    /// Construct a configuration with explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, database_url: impl Into<String>, pool_max_size: u32) -> Self {
        Self {
            bind_addr,
            database_url: database_url.into(),
            pool_max_size,
        }
    }

    /// Read configuration from `BIND_ADDR`, `DATABASE_URL`, and
    /// `POOL_MAX_SIZE`, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = match std::env::var("BIND_ADDR") {
            Ok(value) => value
                .parse()
                .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                    value,
                    message: err.to_string(),
                })?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_DATABASE_URL.to_owned());

        let pool_max_size = match std::env::var("POOL_MAX_SIZE") {
            Ok(value) => value
                .parse()
                .map_err(|err: std::num::ParseIntError| ConfigError::InvalidPoolSize {
                    value,
                    message: err.to_string(),
                })?,
            Err(_) => 10,
        };

        Ok(Self {
            bind_addr,
            database_url,
            pool_max_size,
        })
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// SQLite database URL or file path.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum connections held by the pool.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_values_are_kept() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 9000)), "test.db", 2);

        assert_eq!(config.bind_addr().port(), 9000);
        assert_eq!(config.database_url(), "test.db");
        assert_eq!(config.pool_max_size(), 2);
    }
}
