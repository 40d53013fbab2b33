//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use formaudit_capture::{
    CaptureConfig, DEFAULT_FRAME_TIMEOUT, DEFAULT_IGNORED_ATTRIBUTE_PATTERNS, DEFAULT_IGNORED_TAGS,
    DEFAULT_MAX_VALUE_LENGTH,
};
use formaudit_core::{AuditType, SuggestionThresholds};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureSettings,

    #[serde(default)]
    pub suggestions: SuggestionSettings,

    #[serde(default)]
    pub audits: AuditSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// `[capture]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    #[serde(default = "default_frame_timeout_ms")]
    pub frame_timeout_ms: u64,

    #[serde(default = "default_max_value_length")]
    pub max_value_length: usize,

    #[serde(default = "default_ignored_tags")]
    pub ignored_tags: Vec<String>,

    #[serde(default)]
    pub ignored_attributes: Vec<String>,

    #[serde(default = "default_ignored_attribute_patterns")]
    pub ignored_attribute_patterns: Vec<String>,
}

fn default_frame_timeout_ms() -> u64 {
    DEFAULT_FRAME_TIMEOUT.as_millis() as u64
}

fn default_max_value_length() -> usize {
    DEFAULT_MAX_VALUE_LENGTH
}

fn default_ignored_tags() -> Vec<String> {
    DEFAULT_IGNORED_TAGS.iter().map(|t| t.to_string()).collect()
}

fn default_ignored_attribute_patterns() -> Vec<String> {
    DEFAULT_IGNORED_ATTRIBUTE_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            frame_timeout_ms: default_frame_timeout_ms(),
            max_value_length: default_max_value_length(),
            ignored_tags: default_ignored_tags(),
            ignored_attributes: Vec::new(),
            ignored_attribute_patterns: default_ignored_attribute_patterns(),
        }
    }
}

impl CaptureSettings {
    /// Build the capture configuration, compiling attribute patterns.
    pub fn to_capture_config(&self) -> Result<CaptureConfig, ConfigError> {
        CaptureConfig::default()
            .with_frame_timeout(Duration::from_millis(self.frame_timeout_ms))
            .with_max_value_length(self.max_value_length)
            .with_ignored_tags(self.ignored_tags.iter().cloned())
            .with_ignored_attributes(self.ignored_attributes.iter().cloned())
            .with_ignored_attribute_patterns(&self.ignored_attribute_patterns)
            .map_err(|e| {
                ConfigError::invalid_value("capture.ignored_attribute_patterns", e.to_string())
            })
    }
}

/// `[suggestions]`: similarity thresholds in `0..=1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSettings {
    #[serde(default = "default_attribute_threshold")]
    pub attribute_threshold: f64,

    #[serde(default = "default_input_type_threshold")]
    pub input_type_threshold: f64,

    #[serde(default = "default_autocomplete_threshold")]
    pub autocomplete_threshold: f64,
}

fn default_attribute_threshold() -> f64 {
    SuggestionThresholds::default().attributes
}

fn default_input_type_threshold() -> f64 {
    SuggestionThresholds::default().input_types
}

fn default_autocomplete_threshold() -> f64 {
    SuggestionThresholds::default().autocomplete
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            attribute_threshold: default_attribute_threshold(),
            input_type_threshold: default_input_type_threshold(),
            autocomplete_threshold: default_autocomplete_threshold(),
        }
    }
}

impl SuggestionSettings {
    pub fn thresholds(&self) -> SuggestionThresholds {
        SuggestionThresholds {
            attributes: self.attribute_threshold,
            input_types: self.input_type_threshold,
            autocomplete: self.autocomplete_threshold,
        }
    }
}

/// `[audits]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Audit ids to skip, e.g. `"autocomplete-off"`.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl AuditSettings {
    /// Disabled audits that name a known audit. Unknown ids are reported by
    /// the validator.
    pub fn disabled_types(&self) -> Vec<AuditType> {
        self.disabled
            .iter()
            .filter_map(|id| id.trim().parse().ok())
            .collect()
    }
}

/// `[logging]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily log files. Console only when unset.
    #[serde(default)]
    pub dir: Option<String>,

    /// Emit JSON lines to the log file instead of plain text.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            json: false,
        }
    }
}

impl LoggingSettings {
    /// Log directory with `~` expanded.
    pub fn dir_path(&self) -> Option<PathBuf> {
        self.dir
            .as_deref()
            .map(|dir| PathBuf::from(ConfigLoader::expand_path(dir)))
    }
}
