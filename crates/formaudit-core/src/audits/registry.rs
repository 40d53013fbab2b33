//! Audit registry.
//!
//! The registry owns the list of audits in execution order. Categories run
//! in [`AuditCategory::ALL`] order; within a category, audits run in the
//! order they were registered.

use thiserror::Error;

use super::rules;
use super::types::{AuditCategory, AuditResult, AuditType};
use crate::suggest::Suggesters;
use crate::tree::Tree;

/// Everything an audit may read.
#[derive(Debug, Clone, Copy)]
pub struct AuditScope<'a> {
    pub tree: &'a Tree,
    pub suggesters: &'a Suggesters,
}

impl<'a> AuditScope<'a> {
    pub fn new(tree: &'a Tree, suggesters: &'a Suggesters) -> Self {
        Self { tree, suggesters }
    }
}

/// An audit: returns `None` when nothing was flagged.
pub type AuditFn = fn(&AuditScope<'_>) -> Option<AuditResult>;

#[derive(Debug, Clone, Copy)]
pub struct AuditDefinition {
    pub audit_type: AuditType,
    pub category: AuditCategory,
    pub run: AuditFn,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Audit already registered: {0}")]
    AlreadyRegistered(AuditType),

    #[error("Audit not registered: {0}")]
    NotRegistered(AuditType),
}

/// Ordered set of audits.
#[derive(Debug, Clone)]
pub struct AuditRegistry {
    audits: Vec<AuditDefinition>,
}

impl AuditRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { audits: Vec::new() }
    }

    /// Add an audit after the last audit of its category.
    pub fn register(&mut self, definition: AuditDefinition) -> Result<(), RegistryError> {
        if self.contains(definition.audit_type) {
            return Err(RegistryError::AlreadyRegistered(definition.audit_type));
        }

        let rank = category_rank(definition.category);
        let position = self
            .audits
            .iter()
            .position(|d| category_rank(d.category) > rank)
            .unwrap_or(self.audits.len());
        self.audits.insert(position, definition);
        Ok(())
    }

    pub fn unregister(&mut self, audit_type: AuditType) -> Result<AuditDefinition, RegistryError> {
        let position = self
            .audits
            .iter()
            .position(|d| d.audit_type == audit_type)
            .ok_or(RegistryError::NotRegistered(audit_type))?;
        Ok(self.audits.remove(position))
    }

    pub fn get(&self, audit_type: AuditType) -> Option<&AuditDefinition> {
        self.audits.iter().find(|d| d.audit_type == audit_type)
    }

    pub fn contains(&self, audit_type: AuditType) -> bool {
        self.get(audit_type).is_some()
    }

    /// All audits in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &AuditDefinition> {
        self.audits.iter()
    }

    /// Audits of one category in execution order.
    pub fn category(&self, category: AuditCategory) -> impl Iterator<Item = &AuditDefinition> {
        self.audits.iter().filter(move |d| d.category == category)
    }

    pub fn len(&self) -> usize {
        self.audits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audits.is_empty()
    }
}

impl Default for AuditRegistry {
    /// Every built-in audit.
    fn default() -> Self {
        Self {
            audits: rules::builtin(),
        }
    }
}

fn category_rank(category: AuditCategory) -> usize {
    AuditCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(AuditCategory::ALL.len())
}
