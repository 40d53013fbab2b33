//! Audit runner.

use std::collections::HashSet;

use formaudit_protocols::TreeNode;
use tracing::debug;

use super::registry::{AuditRegistry, AuditScope};
use super::types::{AuditCategory, AuditResult, AuditType};
use crate::suggest::Suggesters;
use crate::tree::Tree;

/// Runs registered audits over a tree.
#[derive(Debug, Clone, Default)]
pub struct AuditRunner {
    registry: AuditRegistry,
    suggesters: Suggesters,
    disabled: HashSet<AuditType>,
}

impl AuditRunner {
    pub fn new(registry: AuditRegistry, suggesters: Suggesters) -> Self {
        Self {
            registry,
            suggesters,
            disabled: HashSet::new(),
        }
    }

    /// Skip the given audits.
    pub fn with_disabled(mut self, disabled: impl IntoIterator<Item = AuditType>) -> Self {
        self.disabled.extend(disabled);
        self
    }

    pub fn registry(&self) -> &AuditRegistry {
        &self.registry
    }

    pub fn is_enabled(&self, audit_type: AuditType) -> bool {
        self.registry.contains(audit_type) && !self.disabled.contains(&audit_type)
    }

    /// Number of audits that will run.
    pub fn enabled_count(&self) -> usize {
        self.registry
            .iter()
            .filter(|d| !self.disabled.contains(&d.audit_type))
            .count()
    }

    /// Run every enabled audit, category by category.
    pub fn run(&self, tree: &Tree) -> Vec<AuditResult> {
        let results: Vec<AuditResult> = AuditCategory::ALL
            .iter()
            .flat_map(|category| self.run_category(*category, tree))
            .collect();
        debug!(
            "Audited {} nodes: {} diagnostic(s)",
            tree.len(),
            results.len()
        );
        results
    }

    /// Run the enabled audits of one category.
    pub fn run_category(&self, category: AuditCategory, tree: &Tree) -> Vec<AuditResult> {
        let scope = AuditScope::new(tree, &self.suggesters);
        let mut results = Vec::new();

        for definition in self.registry.category(category) {
            if self.disabled.contains(&definition.audit_type) {
                debug!("Skipping disabled audit {}", definition.audit_type);
                continue;
            }
            match (definition.run)(&scope) {
                Some(result) => {
                    debug!(
                        audit = %definition.audit_type,
                        items = result.items.len(),
                        "Audit flagged nodes"
                    );
                    results.push(result);
                }
                None => debug!(audit = %definition.audit_type, "Audit passed"),
            }
        }

        results
    }

    /// Normalize a captured tree and audit it.
    pub fn audit(&self, root: &TreeNode) -> (Tree, Vec<AuditResult>) {
        let tree = Tree::normalize(root);
        let results = self.run(&tree);
        (tree, results)
    }
}

/// Run every built-in audit with default settings.
pub fn run_audits(tree: &Tree) -> Vec<AuditResult> {
    AuditRunner::default().run(tree)
}
