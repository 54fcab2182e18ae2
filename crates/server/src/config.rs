//! Environment-driven server configuration.
//!
//! Read once in `main` and handed down explicitly; nothing in the service
//! reaches for the environment after startup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Postgres connection string.
    pub database_url: String,
    /// Base URL under which this service is publicly reachable; blob
    /// public URLs are constructed against it.
    pub public_base_url: String,
    /// Timeout for outbound content fetches, in seconds.
    pub fetch_timeout: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            Err(_) => 3861,
        };

        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));

        let fetch_timeout = match std::env::var("FETCH_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid { name: "FETCH_TIMEOUT_SECS", value })?,
            Err(_) => 30,
        };

        Ok(Self { bind_addr: format!("0.0.0.0:{}", port), database_url, public_base_url, fetch_timeout })
    }
}
