use crate::error::{NtgsError, Result};
use crate::matching::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A setting with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> Setting<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered tool settings: defaults, then `.ntgs/config.toml`, then
/// `NTGS_*` environment variables, then command-line flags
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub match_threshold: Setting<f64>,
    pub case_sensitive: Setting<bool>,
    pub suggestion_count: Setting<usize>,
    pub default_data_type: Setting<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            match_threshold: Setting::new(DEFAULT_THRESHOLD, ConfigSource::Default),
            case_sensitive: Setting::new(false, ConfigSource::Default),
            suggestion_count: Setting::new(3, ConfigSource::Default),
            default_data_type: Setting::new("geology".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| NtgsError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| NtgsError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(threshold) = file_config.match_threshold {
            let threshold = check_threshold(threshold)?;
            self.match_threshold.update(threshold, ConfigSource::File);
        }

        if let Some(case_sensitive) = file_config.case_sensitive {
            self.case_sensitive.update(case_sensitive, ConfigSource::File);
        }

        if let Some(count) = file_config.suggestion_count {
            self.suggestion_count.update(count, ConfigSource::File);
        }

        if let Some(data_type) = file_config.default_data_type {
            self.default_data_type.update(data_type, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // NTGS_MATCH_THRESHOLD
        if let Ok(threshold_str) = env::var("NTGS_MATCH_THRESHOLD") {
            match parse_threshold(&threshold_str) {
                Ok(threshold) => self.match_threshold.update(threshold, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid NTGS_MATCH_THRESHOLD value '{}': expected a number between 0 and 1",
                    threshold_str
                ),
            }
        }

        // NTGS_CASE_SENSITIVE
        if let Ok(flag_str) = env::var("NTGS_CASE_SENSITIVE") {
            match parse_bool(&flag_str) {
                Ok(flag) => self.case_sensitive.update(flag, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid NTGS_CASE_SENSITIVE value '{}': expected true or false",
                    flag_str
                ),
            }
        }

        // NTGS_SUGGESTIONS
        if let Ok(count_str) = env::var("NTGS_SUGGESTIONS") {
            match count_str.trim().parse::<usize>() {
                Ok(count) => self.suggestion_count.update(count, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid NTGS_SUGGESTIONS value '{}': expected a non-negative integer",
                    count_str
                ),
            }
        }

        // NTGS_DATA_TYPE
        if let Ok(data_type) = env::var("NTGS_DATA_TYPE") {
            self.default_data_type.update(data_type, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(threshold) = overrides.match_threshold {
            self.match_threshold.update(threshold, ConfigSource::Cli);
        }

        if let Some(case_sensitive) = overrides.case_sensitive {
            self.case_sensitive.update(case_sensitive, ConfigSource::Cli);
        }

        if let Some(count) = overrides.suggestion_count {
            self.suggestion_count.update(count, ConfigSource::Cli);
        }

        if let Some(data_type) = overrides.default_data_type {
            self.default_data_type.update(data_type, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "match_threshold".to_string(),
            (self.match_threshold.value.to_string(), self.match_threshold.source),
        );

        map.insert(
            "case_sensitive".to_string(),
            (self.case_sensitive.value.to_string(), self.case_sensitive.source),
        );

        map.insert(
            "suggestion_count".to_string(),
            (self.suggestion_count.value.to_string(), self.suggestion_count.source),
        );

        map.insert(
            "default_data_type".to_string(),
            (self.default_data_type.value.clone(), self.default_data_type.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    match_threshold: Option<f64>,
    case_sensitive: Option<bool>,
    suggestion_count: Option<usize>,
    default_data_type: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub match_threshold: Option<f64>,
    pub case_sensitive: Option<bool>,
    pub suggestion_count: Option<usize>,
    pub default_data_type: Option<String>,
}

/// Parse a match threshold in `[0, 1]`
pub fn parse_threshold(s: &str) -> Result<f64> {
    let threshold = s.trim().parse::<f64>().map_err(|_| NtgsError::ConfigInvalid {
        key: "match_threshold".to_string(),
        reason: format!("Invalid threshold: {}. Use a number between 0 and 1", s),
    })?;
    check_threshold(threshold)
}

fn check_threshold(threshold: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(NtgsError::ConfigInvalid {
            key: "match_threshold".to_string(),
            reason: format!("Threshold {} is outside 0..=1", threshold),
        })
    }
}

/// Parse a boolean flag from string
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(NtgsError::ConfigInvalid {
            key: "case_sensitive".to_string(),
            reason: format!("Invalid flag: {}. Use true or false", s),
        }),
    }
}
