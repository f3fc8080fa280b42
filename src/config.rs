use crate::core::{gesture::GestureTiming, placement::PlacementParams, scoring::LocalityBonus};
use crate::models::ScoringWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scoring: ScoringSettings,
    pub layout: PlacementParams,
    pub gesture: GestureTiming,
    pub viewport: ViewportSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub weights: ScoringWeights,
    pub locality: LocalityBonus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportSettings {
    /// Screen-space margin kept around the viewport when culling
    #[serde(default = "default_cull_margin")]
    pub margin: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            margin: default_cull_margin(),
        }
    }
}

fn default_cull_margin() -> f64 { 100.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ASTRA__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. ASTRA__LAYOUT__MIN_SEPARATION -> layout.min_separation
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ASTRA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
