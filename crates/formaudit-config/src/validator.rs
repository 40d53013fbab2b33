//! Configuration validation.

use formaudit_core::AuditType;
use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_capture(config, &mut result);
        Self::validate_suggestions(config, &mut result);
        Self::validate_audits(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_capture(config: &Config, result: &mut ValidationResult) {
        let capture = &config.capture;

        if capture.frame_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "capture.frame_timeout_ms",
                "frame_timeout_ms must be greater than 0",
            ));
        } else if capture.frame_timeout_ms > 30_000 {
            result.add_warning(ValidationWarning::new(
                "capture.frame_timeout_ms",
                "frame_timeout_ms is very high (>30s), a hung frame will stall the capture",
            ));
        }

        if capture.max_value_length == 0 {
            result.add_error(ValidationError::new(
                "capture.max_value_length",
                "max_value_length must be greater than 0",
            ));
        }

        for tag in &capture.ignored_tags {
            if tag.chars().any(|c| c.is_ascii_uppercase()) {
                result.add_warning(ValidationWarning::new(
                    "capture.ignored_tags",
                    format!("Tag '{}' will be matched as '{}'", tag, tag.to_ascii_lowercase()),
                ));
            }
        }

        for pattern in &capture.ignored_attribute_patterns {
            if let Err(e) = Regex::new(pattern) {
                result.add_error(ValidationError::new(
                    "capture.ignored_attribute_patterns",
                    format!("Invalid pattern '{}': {}", pattern, e),
                ));
            }
        }
    }

    fn validate_suggestions(config: &Config, result: &mut ValidationResult) {
        let suggestions = &config.suggestions;
        let thresholds = [
            ("suggestions.attribute_threshold", suggestions.attribute_threshold),
            ("suggestions.input_type_threshold", suggestions.input_type_threshold),
            ("suggestions.autocomplete_threshold", suggestions.autocomplete_threshold),
        ];

        for (path, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                result.add_error(ValidationError::new(
                    path,
                    format!("Threshold must be between 0 and 1, got {}", value),
                ));
            } else if value == 0.0 {
                result.add_warning(ValidationWarning::new(
                    path,
                    "A threshold of 0 suggests the closest value for any input",
                ));
            }
        }
    }

    fn validate_audits(config: &Config, result: &mut ValidationResult) {
        for id in &config.audits.disabled {
            if id.trim().parse::<AuditType>().is_err() {
                result.add_warning(ValidationWarning::new(
                    "audits.disabled",
                    format!("Unknown audit '{}' is ignored", id),
                ));
            }
        }

        let disabled = config.audits.disabled_types();
        if AuditType::ALL.iter().all(|t| disabled.contains(t)) {
            result.add_warning(ValidationWarning::new(
                "audits.disabled",
                "Every audit is disabled",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        }

        if config.logging.json && config.logging.dir.is_none() {
            result.add_warning(ValidationWarning::new(
                "logging.json",
                "json only applies to file logging, set logging.dir to enable it",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
