//! Server configuration.
//!
//! Values are layered: built-in defaults, then `config/default.yaml`, then an
//! optional `config/{APP_ENV}.yaml`, then `APP_*` environment variables.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::db::ConnectionOptions;

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub app_name: String,
    pub app_version: String,
    pub address: String,
    pub port: u16,
    pub debug: bool,
    pub api_v1_prefix: String,
    pub unified_logs_enabled: bool,
    pub db_busy_timeout_ms: u64,
    pub db_pool_size: u32,
}

impl ServerConfig {
    /// Loads configuration from `./config` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").ok();
        Self::load_from(Path::new("config"), env.as_deref())
    }

    /// Loads configuration with files taken from `dir`.
    pub fn load_from(dir: &Path, env: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database_url", "grooming.db")?
            .set_default("app_name", env!("CARGO_PKG_NAME"))?
            .set_default("app_version", env!("CARGO_PKG_VERSION"))?
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8001)?
            .set_default("debug", false)?
            .set_default("api_v1_prefix", "/api/v1")?
            .set_default("unified_logs_enabled", true)?
            .set_default("db_busy_timeout_ms", 5000)?
            .set_default("db_pool_size", 8)?
            .add_source(File::from(dir.join("default")).required(false));

        if let Some(env) = env.filter(|e| !e.is_empty()) {
            builder = builder.add_source(File::from(dir.join(env)).required(false));
        }

        builder
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            busy_timeout: Duration::from_millis(self.db_busy_timeout_ms),
            pool_size: self.db_pool_size,
        }
    }

    /// Default `env_logger` filter for this configuration.
    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}
