//! # configs
//!
//! Layered settings for the postboard binaries.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/local.toml` (optional, not committed)
//! 4. Environment variables with the `POSTBOARD` prefix and `__` separator,
//!    e.g. `POSTBOARD__SERVER__PORT=8080`, `POSTBOARD__DATABASE__URL=postgres://...`
//!
//! `.env` is loaded into the environment first when present.

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub hashing: HashingSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Postgres URL. When absent the server keeps everything in memory.
    pub url: Option<SecretString>,
    pub max_connections: u32,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HashingSettings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive; `RUST_LOG` still wins when set.
    pub filter: String,
    pub format: LogFormat,
}

impl Settings {
    /// Loads `.env`, then every layer described in the module docs.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false))
                .add_source(Environment::with_prefix("POSTBOARD").separator("__")),
        )
    }

    /// Defaults only. Used by tests and as the base layer of [`Settings::load`].
    pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError>
    {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("database.max_connections", 5)?
            .set_default("hashing.memory_kib", 19 * 1024)?
            .set_default("hashing.iterations", 2)?
            .set_default("hashing.parallelism", 1)?
            .set_default("log.filter", "info,tower_http=debug")?
            .set_default("log.format", "pretty")?)
    }

    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        Ok(builder.build()?.try_deserialize()?)
    }
}
