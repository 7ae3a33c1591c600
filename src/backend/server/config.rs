/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration from
 * environment variables, and opening the store the configuration names.
 *
 * # Variables
 *
 * - `DATABASE_URL` - SQLite connection string; unset means in-memory store
 * - `SERVER_PORT` - listen port (default 5000)
 * - `REAP_INTERVAL_SECS` - seconds between reap passes (default 15)
 * - `INACTIVITY_THRESHOLD_SECS` - silence allowed before reaping (default 10)
 */

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::backend::presence::reaper::{DEFAULT_INACTIVITY_THRESHOLD, DEFAULT_REAP_INTERVAL};
use crate::backend::store::{ChatStore, MemoryStore, SqlStore, StoreError};

pub const DEFAULT_PORT: u16 = 5000;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Store connection string
    pub database_url: Option<String>,
    /// Listen port
    pub port: u16,
    /// Time between reap passes
    pub reap_interval: Duration,
    /// Inactivity allowed before a participant is reaped
    pub inactivity_threshold: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            port: DEFAULT_PORT,
            reap_interval: DEFAULT_REAP_INTERVAL,
            inactivity_threshold: DEFAULT_INACTIVITY_THRESHOLD,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_var("SERVER_PORT", &port)?);
        }
        if let Some(secs) = lookup("REAP_INTERVAL_SECS") {
            builder = builder.reap_interval(Duration::from_secs(parse_var("REAP_INTERVAL_SECS", &secs)?));
        }
        if let Some(secs) = lookup("INACTIVITY_THRESHOLD_SECS") {
            builder = builder.inactivity_threshold(Duration::from_secs(parse_var(
                "INACTIVITY_THRESHOLD_SECS",
                &secs,
            )?));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reap_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("REAP_INTERVAL_SECS"));
        }
        if self.inactivity_threshold.is_zero() {
            return Err(ConfigError::ZeroDuration("INACTIVITY_THRESHOLD_SECS"));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    database_url: Option<String>,
    port: Option<u16>,
    reap_interval: Option<Duration>,
    inactivity_threshold: Option<Duration>,
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn reap_interval(mut self, interval: Duration) -> Self {
        self.reap_interval = Some(interval);
        self
    }

    pub fn inactivity_threshold(mut self, threshold: Duration) -> Self {
        self.inactivity_threshold = Some(threshold);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();
        let config = ServerConfig {
            database_url: self.database_url,
            port: self.port.unwrap_or(defaults.port),
            reap_interval: self.reap_interval.unwrap_or(defaults.reap_interval),
            inactivity_threshold: self
                .inactivity_threshold
                .unwrap_or(defaults.inactivity_threshold),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Open the store named by the configuration
///
/// Without `DATABASE_URL` the server runs on an in-memory store, which loses
/// the room on restart. A configured database that cannot be opened is an
/// error.
pub async fn load_store(config: &ServerConfig) -> Result<Arc<dyn ChatStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = SqlStore::connect(url).await.map_err(|e| {
                tracing::error!("Failed to open database: {}", e);
                e
            })?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using an in-memory store; the room will not survive a restart.");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.reap_interval, Duration::from_secs(15));
        assert_eq!(config.inactivity_threshold, Duration::from_secs(10));
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://chat.db"),
            ("SERVER_PORT", "8080"),
            ("REAP_INTERVAL_SECS", "30"),
            ("INACTIVITY_THRESHOLD_SECS", "20"),
        ]))
        .unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite://chat.db"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.reap_interval, Duration::from_secs(30));
        assert_eq!(config.inactivity_threshold, Duration::from_secs(20));
    }

    #[test]
    fn test_blank_database_url_is_unset() {
        let config = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("SERVER_PORT", "http")])).unwrap_err(),
            ConfigError::InvalidNumber {
                var: "SERVER_PORT",
                value: "http".to_string()
            }
        );
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("REAP_INTERVAL_SECS", "0")])).unwrap_err(),
            ConfigError::ZeroDuration("REAP_INTERVAL_SECS")
        );
    }

    #[tokio::test]
    async fn test_load_store_without_database_url() {
        let store = load_store(&ServerConfig::default()).await.unwrap();
        assert!(store.list_participants().await.unwrap().is_empty());
    }
}
