//! Configuration types and loading
//!
//! The API base URL used by clients is resolved in exactly one place,
//! [`resolve_api_base`], with this precedence:
//!
//! 1. a runtime value (explicit override, else the `HR_API_URL` environment
//!    variable at the time the client is built),
//! 2. the build-time value (`HR_API_URL` captured when the crate was compiled),
//! 3. [`DEFAULT_API_BASE`].

use serde::{Deserialize, Serialize};

/// Fallback API base URL when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Environment variable carrying the API base URL
pub const API_URL_ENV: &str = "HR_API_URL";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// API client configuration
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Runtime-injected API base URL, if any
    pub api_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:employees.db".to_string(),
                max_connections: 5,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            client: ClientConfig {
                api_url: None,
                timeout_seconds: 30,
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Database - DATABASE_URL first, then the legacy DB_DSN file path
        if let Some(url) = lookup("DATABASE_URL") {
            config.database.url = url;
        } else if let Some(dsn) = lookup("DB_DSN") {
            config.database.url = sqlite_url_from_dsn(&dsn);
        }
        if let Some(size) = lookup("DB_MAX_CONNECTIONS") {
            config.database.max_connections = parse_number("DB_MAX_CONNECTIONS", &size)?;
        }

        // Server
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse_number("PORT", &port)?;
        }

        // Client
        config.client.api_url = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty());
        if let Some(timeout) = lookup("HR_API_TIMEOUT_SECS") {
            config.client.timeout_seconds = parse_number("HR_API_TIMEOUT_SECS", &timeout)?;
        }

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// `DB_DSN` holds a bare file path (or `:memory:`); sqlx wants a URL
fn sqlite_url_from_dsn(dsn: &str) -> String {
    if dsn.starts_with("sqlite:") {
        dsn.to_string()
    } else {
        format!("sqlite:{}", dsn)
    }
}

/// Resolve the API base URL: runtime override or environment, then the
/// build-time value, then the default
pub fn resolve_api_base(runtime_override: Option<&str>) -> String {
    let runtime = runtime_override
        .map(str::to_string)
        .or_else(|| std::env::var(API_URL_ENV).ok());
    resolve_api_base_from(runtime.as_deref(), option_env!("HR_API_URL"))
}

/// Pure resolution step; blank candidates are skipped and trailing slashes
/// are removed so paths can be appended directly
pub fn resolve_api_base_from(runtime: Option<&str>, build_time: Option<&str>) -> String {
    let base = [runtime, build_time]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_API_BASE);

    tracing::debug!(base, "resolved API base URL");
    base.trim_end_matches('/').to_string()
}
