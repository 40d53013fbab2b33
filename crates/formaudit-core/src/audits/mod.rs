//! Audit engine.
//!
//! Every audit is a plain function over a normalized [`Tree`](crate::tree::Tree)
//! that returns at most one [`AuditResult`]. Audits are grouped into
//! categories which run in a fixed order:
//!
//! | Category       | Audits                                                    |
//! |----------------|-----------------------------------------------------------|
//! | forms          | `form-empty`                                              |
//! | attributes     | `invalid-attributes`, `missing-identifier`, `unique-ids`, `unique-names` |
//! | autocomplete   | `autocomplete-suggested`, `autocomplete-empty`, `autocomplete-off`, `autocomplete-invalid` |
//! | labels         | `label-empty`, `label-unique`, `label-no-interactive-content`, `label-no-field`, `label-for-empty`, `label-for-unique` |
//! | inputs         | `input-type-invalid`, `input-no-label`, `aria-labelledby-missing` |

pub mod registry;
pub mod report;
pub mod runner;
pub mod types;

mod rules;

pub use registry::{AuditDefinition, AuditFn, AuditRegistry, AuditScope, RegistryError};
pub use report::{AuditReport, NodeRef};
pub use runner::{AuditRunner, run_audits};
pub use types::{
    AuditCategory, AuditContext, AuditItem, AuditResult, AuditType, Reason, ReasonKind, Reference,
    Severity,
};
