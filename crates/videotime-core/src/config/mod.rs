//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod cache;
pub mod database;
pub mod defaults;
pub mod logging;
pub mod plugin;
pub mod tracker;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::cache::CacheConfig;
pub use self::database::DatabaseConfig;
pub use self::defaults::InstanceDefaults;
pub use self::logging::LoggingConfig;
pub use self::plugin::PluginConfig;
pub use self::tracker::{StoreBackend, TrackerConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `VIDEOTIME__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Watch tracking behaviour.
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Site defaults and force flags for instance settings.
    #[serde(default)]
    pub defaults: InstanceDefaults,
    /// Tab and player plugin selection.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Instance settings cache.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for an environment.
    ///
    /// Merges `config/default`, the `config/{env}` overlay and environment
    /// variables prefixed with `VIDEOTIME__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name(&format!("config/{env}")).required(false)),
        )
    }

    /// Load configuration from an explicit file plus environment variables.
    pub fn load_from(path: &str) -> Result<Self, AppError> {
        Self::build(config::Config::builder().add_source(config::File::with_name(path)))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("VIDEOTIME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the tracker misbehave.
    pub fn validate(&self) -> Result<(), AppError> {
        let epsilon = self.tracker.seek_epsilon;
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(AppError::configuration(format!(
                "tracker.seek_epsilon must be within [0, 1], got {epsilon}"
            )));
        }
        if self.tracker.resume_end_tolerance_seconds < 0.0 {
            return Err(AppError::configuration(
                "tracker.resume_end_tolerance_seconds must not be negative",
            ));
        }
        let percent = self.defaults.completion_on_percent_value.value;
        if !(1..=100).contains(&percent) {
            return Err(AppError::configuration(format!(
                "defaults.completion_on_percent_value must be within 1..=100, got {percent}"
            )));
        }
        Ok(())
    }
}
