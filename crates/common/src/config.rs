//! Application configuration.

use serde::Deserialize;
use std::path::Path;
use validator::{Validate, ValidationError};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Config {
    /// Rendering configuration.
    #[serde(default)]
    #[validate(nested)]
    pub render: RenderConfig,
    /// Logging configuration.
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Rendering configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenderConfig {
    /// Same-origin path of the media cache proxy.
    #[serde(default = "default_cache_endpoint")]
    #[validate(custom(function = "validate_endpoint"))]
    pub cache_endpoint: String,
    /// Whether remote media is routed through the cache proxy.
    #[serde(default = "default_true")]
    pub proxy_media: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    #[validate(length(min = 1))]
    pub filter: String,
    /// Emit JSON-formatted log lines.
    #[serde(default)]
    pub json: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache_endpoint: default_cache_endpoint(),
            proxy_media: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_cache_endpoint() -> String {
    "/api/cache".to_string()
}

fn default_log_filter() -> String {
    "enigmatick=info".to_string()
}

const fn default_true() -> bool {
    true
}

fn validate_endpoint(endpoint: &str) -> Result<(), ValidationError> {
    if endpoint.starts_with('/') && endpoint.len() > 1 {
        Ok(())
    } else {
        Err(ValidationError::new("cache_endpoint_must_be_absolute_path"))
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `ENIGMATICK_ENV`)
    /// 3. Environment variables with `ENIGMATICK__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("ENIGMATICK_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ENIGMATICK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("ENIGMATICK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
