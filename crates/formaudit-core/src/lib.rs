//! Core of formaudit: the tree model, the suggestion engine and the audits.
//!
//! ```
//! use formaudit_core::{Tree, run_audits};
//! use formaudit_protocols::TreeNode;
//!
//! let root = TreeNode::root(vec![TreeNode::element("form")]);
//! let tree = Tree::normalize(&root);
//! let results = run_audits(&tree);
//! assert_eq!(results[0].audit_type.as_str(), "form-empty");
//! ```

pub mod audits;
pub mod strings;
pub mod suggest;
pub mod tree;

pub use audits::{
    AuditCategory, AuditContext, AuditItem, AuditReport, AuditResult, AuditRunner, AuditType,
    NodeRef, Severity, run_audits,
};
pub use suggest::{Suggester, Suggesters, SuggestionThresholds};
pub use tree::{Node, NodeId, Tree};
