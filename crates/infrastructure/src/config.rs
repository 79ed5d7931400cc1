//! Application configuration
//!
//! Loaded once at startup: built-in defaults, then an optional
//! `config.toml`, then `CHAOSCART_*` environment overrides. The chaos
//! section is validated eagerly so bad rates fail the boot instead of
//! degrading silently at decision time.

use serde::{Deserialize, Serialize};

use crate::chaos::{ChaosConfig, ChaosConfigError};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: None,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Chaos injection settings
    #[serde(default)]
    pub chaos: ChaosConfig,
}

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Source loading or deserialization failed
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    /// The chaos section failed validation
    #[error("invalid chaos configuration: {0}")]
    Chaos(#[from] ChaosConfigError),
}

impl AppConfig {
    /// Load configuration from defaults, `config.toml`, and environment.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be parsed or the chaos section contains
    /// out-of-range rates.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., CHAOSCART_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("CHAOSCART")
                    .separator("_")
                    .try_parsing(true),
            );

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.chaos.validate()?;
        Ok(loaded)
    }
}
