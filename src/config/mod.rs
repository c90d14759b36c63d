//! Application configuration management

use std::env;

use anyhow::{Context, Result, bail};

use crate::services::{FailurePolicy, MAX_EVENTS_CAPACITY};

/// Default HTTP port for the GraphQL endpoint
pub const DEFAULT_PORT: u16 = 4000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (defaults to all interfaces)
    pub host: Option<String>,

    /// Server port
    pub port: u16,

    /// SQLite URL or path. When unset the catalog lives in memory.
    pub database_url: Option<String>,

    /// Maximum SQLite pool size
    pub database_max_connections: u32,

    /// How storage failures reach GraphQL callers
    pub failure_policy: FailurePolicy,

    /// Capacity of the movieAdded broadcast channel
    pub movie_events_capacity: usize,

    /// Load the seed actors and movies into an empty store on startup
    pub seed_catalog: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            database_url: None,
            database_max_connections: 5,
            failure_policy: FailurePolicy::default(),
            movie_events_capacity: 256,
            seed_catalog: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Prefer DATABASE_PATH, fall back to DATABASE_URL
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .ok()
            .filter(|v| !v.trim().is_empty());

        let failure_policy = match env::var("CATALOG_FAILURE_POLICY") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("Invalid CATALOG_FAILURE_POLICY '{}'", v))?,
            Err(_) => defaults.failure_policy,
        };

        Ok(Self {
            host: env::var("HOST").ok(),

            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.database_max_connections),

            failure_policy,

            movie_events_capacity: match env::var("MOVIE_EVENTS_CAPACITY") {
                Ok(v) => parse_capacity(&v)?,
                Err(_) => defaults.movie_events_capacity,
            },

            seed_catalog: match env::var("SEED_CATALOG") {
                Ok(v) => parse_flag("SEED_CATALOG", &v)?,
                Err(_) => defaults.seed_catalog,
            },
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host.as_deref().unwrap_or("0.0.0.0"), self.port)
    }
}

/// Parse MOVIE_EVENTS_CAPACITY, which must be within `1..=MAX_EVENTS_CAPACITY`
fn parse_capacity(value: &str) -> Result<usize> {
    let cap: usize = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid MOVIE_EVENTS_CAPACITY '{}'", value))?;
    if cap == 0 || cap > MAX_EVENTS_CAPACITY {
        bail!(
            "MOVIE_EVENTS_CAPACITY must be between 1 and {}, got {}",
            MAX_EVENTS_CAPACITY,
            cap
        );
    }
    Ok(cap)
}

/// Parse a boolean switch, case-insensitively
fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => bail!("Invalid {} '{}': expected true or false", name, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 4000);
        assert!(config.database_url.is_none());
        assert_eq!(config.failure_policy, FailurePolicy::SoftFail);
        assert!(config.seed_catalog);
    }

    #[test]
    fn test_bind_addr() {
        let mut config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:4000");

        config.host = Some("127.0.0.1".to_string());
        config.port = 8080;
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_flag() {
        for value in ["true", "TRUE", " Yes ", "1", "on"] {
            assert!(parse_flag("SEED_CATALOG", value).unwrap(), "{}", value);
        }
        for value in ["false", "False", "NO", "0", "off"] {
            assert!(!parse_flag("SEED_CATALOG", value).unwrap(), "{}", value);
        }
        assert!(parse_flag("SEED_CATALOG", "maybe").is_err());
    }

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("256").unwrap(), 256);
        assert_eq!(parse_capacity(&MAX_EVENTS_CAPACITY.to_string()).unwrap(), MAX_EVENTS_CAPACITY);
        assert!(parse_capacity("0").is_err());
        assert!(parse_capacity("lots").is_err());
        assert!(parse_capacity(&usize::MAX.to_string()).is_err());
    }
}
