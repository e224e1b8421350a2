//! Configuration for lumina-core
//!
//! Centralized configuration for analysis defaults, the live feed, and the
//! assistant context limits.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuminaConfig {
    /// Statistics and table defaults
    pub analysis: AnalysisConfig,
    /// Live feed simulation
    pub stream: StreamConfig,
    /// Reasoning-service context limits
    pub assist: AssistConfig,
}

/// Statistics and table defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Default number of histogram bins
    pub histogram_bins: usize,
    /// A correlation pair needs strictly more paired values than this
    pub min_correlation_samples: usize,
    /// Rows shown in a table preview
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 10,
            min_correlation_samples: 5,
            preview_rows: 100,
        }
    }
}

/// Live feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Maximum relative change per tick; the delta is drawn from
    /// `[-0.5, 0.5) * perturbation * value`
    pub perturbation: f64,
    /// Decimal places kept after perturbing
    pub decimals: u32,
    /// Column overwritten with the wall-clock time on each tick
    pub timestamp_column: String,
    /// Seed for reproducible feeds; entropy when absent
    pub seed: Option<u64>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1500,
            perturbation: 0.1,
            decimals: 2,
            timestamp_column: "timestamp".to_string(),
            seed: None,
        }
    }
}

impl StreamConfig {
    /// Tick period as a duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Reasoning-service context limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Rows sent with a chat message
    pub chat_sample_rows: usize,
    /// Rows sent with an insight request
    pub insight_sample_rows: usize,
    /// Most recent conversation turns sent with a chat message
    pub history_turns: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            chat_sample_rows: 20,
            insight_sample_rows: 30,
            history_turns: 6,
            timeout_secs: 30,
        }
    }
}

impl AssistConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LuminaConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Default config file location (`<config dir>/lumina/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lumina").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file is absent or invalid
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::from_path(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load configuration: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.histogram_bins == 0 {
            return Err(ConfigError::OutOfRange(
                "histogram_bins must be at least 1".to_string(),
            ));
        }

        if self.stream.tick_interval_ms == 0 {
            return Err(ConfigError::OutOfRange(
                "tick_interval_ms must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.stream.perturbation) {
            return Err(ConfigError::OutOfRange(
                "perturbation must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.stream.decimals > 10 {
            return Err(ConfigError::OutOfRange(
                "decimals must be at most 10".to_string(),
            ));
        }

        if self.assist.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
