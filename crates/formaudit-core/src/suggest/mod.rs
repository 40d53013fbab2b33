//! "Did you mean" suggestions.
//!
//! A [`Suggester`] holds a closed vocabulary, an alias table and a similarity
//! threshold. Similarity is normalized Damerau-Levenshtein on lowercased
//! input, so a single transposition costs one edit. Ties keep the earliest
//! vocabulary entry, which makes suggestions deterministic.

pub mod vocabulary;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use vocabulary::{
    AUTOCOMPLETE_ALIASES, AUTOCOMPLETE_FIELDS, AUTOCOMPLETE_MODIFIERS, FIELD_LIKE_ELEMENTS,
    GLOBAL_ATTRIBUTES, INPUT_TYPE_ALIASES, INPUT_TYPES, element_attributes,
};

/// Fuzzy matcher over a closed vocabulary.
#[derive(Debug, Clone)]
pub struct Suggester {
    entries: Vec<String>,
    aliases: HashMap<String, String>,
    threshold: f64,
}

impl Suggester {
    pub fn new<I, S>(vocabulary: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<String> = Vec::new();
        for entry in vocabulary {
            let entry = entry.into().to_ascii_lowercase();
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Self {
            entries,
            aliases: HashMap::new(),
            threshold,
        }
    }

    /// Add alias entries. Alias keys become searchable and resolve to their
    /// target when matched.
    pub fn with_aliases(mut self, aliases: &[(&str, &str)]) -> Self {
        for (from, to) in aliases {
            let from = from.to_ascii_lowercase();
            if !self.entries.contains(&from) {
                self.entries.push(from.clone());
            }
            self.aliases.insert(from, to.to_string());
        }
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Best scoring entry regardless of threshold.
    pub fn best_match(&self, candidate: &str) -> Option<(&str, f64)> {
        let candidate = candidate.trim().to_ascii_lowercase();
        if candidate.is_empty() {
            return None;
        }

        let mut best: Option<(&str, f64)> = None;
        for entry in &self.entries {
            let score = strsim::normalized_damerau_levenshtein(&candidate, entry);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((entry.as_str(), score));
            }
        }
        best
    }

    /// Suggested replacement for `candidate`, alias-resolved, or `None` when
    /// nothing scores at or above the threshold.
    pub fn suggest(&self, candidate: &str) -> Option<String> {
        self.best_match(candidate)
            .filter(|(_, score)| *score >= self.threshold)
            .map(|(entry, _)| self.resolve(entry).to_string())
    }

    /// Exact (case-insensitive) lookup, alias-resolved.
    pub fn lookup(&self, candidate: &str) -> Option<String> {
        let candidate = candidate.trim().to_ascii_lowercase();
        self.entries
            .iter()
            .find(|entry| **entry == candidate)
            .map(|entry| self.resolve(entry).to_string())
    }

    fn resolve<'a>(&'a self, entry: &'a str) -> &'a str {
        self.aliases.get(entry).map(String::as_str).unwrap_or(entry)
    }
}

/// Similarity thresholds per vocabulary.
///
/// Attribute names use the tightest threshold; the autocomplete vocabulary is
/// larger and more ambiguous, so it accepts looser matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionThresholds {
    pub attributes: f64,
    pub input_types: f64,
    pub autocomplete: f64,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            attributes: 0.75,
            input_types: 0.7,
            autocomplete: 0.6,
        }
    }
}

/// Every suggester the audits need.
#[derive(Debug, Clone)]
pub struct Suggesters {
    attributes: HashMap<&'static str, Suggester>,
    input_types: Suggester,
    autocomplete: Suggester,
    autocomplete_fields: Suggester,
}

impl Suggesters {
    pub fn new(thresholds: SuggestionThresholds) -> Self {
        let attributes = FIELD_LIKE_ELEMENTS
            .iter()
            .map(|tag| {
                let own = element_attributes(tag).unwrap_or(&[]);
                let vocabulary = own.iter().chain(GLOBAL_ATTRIBUTES.iter()).copied();
                (*tag, Suggester::new(vocabulary, thresholds.attributes))
            })
            .collect();

        let input_types = Suggester::new(INPUT_TYPES.iter().copied(), thresholds.input_types)
            .with_aliases(INPUT_TYPE_ALIASES);

        let autocomplete = Suggester::new(
            AUTOCOMPLETE_FIELDS
                .iter()
                .chain(AUTOCOMPLETE_MODIFIERS.iter())
                .copied(),
            thresholds.autocomplete,
        )
        .with_aliases(AUTOCOMPLETE_ALIASES);

        let autocomplete_fields = Suggester::new(AUTOCOMPLETE_FIELDS.iter().copied(), 1.0)
            .with_aliases(AUTOCOMPLETE_ALIASES);

        Self {
            attributes,
            input_types,
            autocomplete,
            autocomplete_fields,
        }
    }

    /// Suggested attribute name for an unknown attribute on `tag`.
    pub fn attribute(&self, tag: &str, candidate: &str) -> Option<String> {
        self.attributes
            .get(tag)
            .and_then(|suggester| suggester.suggest(candidate))
    }

    pub fn input_type(&self, candidate: &str) -> Option<String> {
        self.input_types.suggest(candidate)
    }

    pub fn autocomplete(&self, candidate: &str) -> Option<String> {
        self.autocomplete.suggest(candidate)
    }

    /// Autofill token implied by a field's `id` or `name`.
    ///
    /// `firstName`, `first_name` and `first-name` all resolve to `given-name`.
    pub fn autocomplete_for_identifier(&self, identifier: &str) -> Option<String> {
        self.autocomplete_fields.lookup(&kebab_case(identifier))
    }
}

impl Default for Suggesters {
    fn default() -> Self {
        Self::new(SuggestionThresholds::default())
    }
}

/// `firstName` / `first_name` / `First Name` -> `first-name`.
fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.trim().chars() {
        if c == '_' || c == ' ' || c == '-' {
            if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c.to_ascii_lowercase());
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
