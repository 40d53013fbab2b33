//! Capture settings.

use std::time::Duration;

use regex::Regex;

use crate::error::CaptureError;

/// Default wait for a frame to answer an inspect request.
pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_millis(500);

/// Default bound on captured attribute values and text, in characters.
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 400;

/// Tags captured as leaves: their children are never enumerated.
pub const DEFAULT_IGNORED_TAGS: &[&str] = &["script", "style", "svg", "head", "textarea"];

/// Browser-injected autofill debugging attributes.
pub const DEFAULT_IGNORED_ATTRIBUTE_PATTERNS: &[&str] = &["^autofill-"];

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub frame_timeout: Duration,
    pub max_value_length: usize,
    pub ignored_tags: Vec<String>,
    pub ignored_attributes: Vec<String>,
    pub ignored_attribute_patterns: Vec<Regex>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_timeout: DEFAULT_FRAME_TIMEOUT,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
            ignored_tags: DEFAULT_IGNORED_TAGS.iter().map(|t| t.to_string()).collect(),
            ignored_attributes: Vec::new(),
            ignored_attribute_patterns: DEFAULT_IGNORED_ATTRIBUTE_PATTERNS
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
        }
    }
}

impl CaptureConfig {
    pub fn with_frame_timeout(mut self, timeout: Duration) -> Self {
        self.frame_timeout = timeout;
        self
    }

    pub fn with_max_value_length(mut self, max: usize) -> Self {
        self.max_value_length = max;
        self
    }

    pub fn with_ignored_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_tags = tags
            .into_iter()
            .map(|t| t.into().to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_ignored_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the ignored attribute patterns. Fails on the first invalid
    /// regex.
    pub fn with_ignored_attribute_patterns<I, S>(mut self, patterns: I) -> Result<Self, CaptureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored_attribute_patterns = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn is_ignored_tag(&self, tag: &str) -> bool {
        self.ignored_tags.iter().any(|t| t == tag)
    }

    pub fn is_ignored_attribute(&self, name: &str) -> bool {
        self.ignored_attributes.iter().any(|a| a == name)
            || self.ignored_attribute_patterns.iter().any(|p| p.is_match(name))
    }
}
