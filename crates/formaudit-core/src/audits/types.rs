//! Diagnostic types.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::tree::NodeId;

/// Stable audit identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditType {
    FormEmpty,
    InvalidAttributes,
    MissingIdentifier,
    UniqueIds,
    UniqueNames,
    AutocompleteSuggested,
    AutocompleteEmpty,
    AutocompleteOff,
    AutocompleteInvalid,
    LabelEmpty,
    LabelUnique,
    LabelNoInteractiveContent,
    LabelNoField,
    LabelForEmpty,
    LabelForUnique,
    InputTypeInvalid,
    InputNoLabel,
    AriaLabelledbyMissing,
}

impl AuditType {
    pub const ALL: &'static [AuditType] = &[
        AuditType::FormEmpty,
        AuditType::InvalidAttributes,
        AuditType::MissingIdentifier,
        AuditType::UniqueIds,
        AuditType::UniqueNames,
        AuditType::AutocompleteSuggested,
        AuditType::AutocompleteEmpty,
        AuditType::AutocompleteOff,
        AuditType::AutocompleteInvalid,
        AuditType::LabelEmpty,
        AuditType::LabelUnique,
        AuditType::LabelNoInteractiveContent,
        AuditType::LabelNoField,
        AuditType::LabelForEmpty,
        AuditType::LabelForUnique,
        AuditType::InputTypeInvalid,
        AuditType::InputNoLabel,
        AuditType::AriaLabelledbyMissing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditType::FormEmpty => "form-empty",
            AuditType::InvalidAttributes => "invalid-attributes",
            AuditType::MissingIdentifier => "missing-identifier",
            AuditType::UniqueIds => "unique-ids",
            AuditType::UniqueNames => "unique-names",
            AuditType::AutocompleteSuggested => "autocomplete-suggested",
            AuditType::AutocompleteEmpty => "autocomplete-empty",
            AuditType::AutocompleteOff => "autocomplete-off",
            AuditType::AutocompleteInvalid => "autocomplete-invalid",
            AuditType::LabelEmpty => "label-empty",
            AuditType::LabelUnique => "label-unique",
            AuditType::LabelNoInteractiveContent => "label-no-interactive-content",
            AuditType::LabelNoField => "label-no-field",
            AuditType::LabelForEmpty => "label-for-empty",
            AuditType::LabelForUnique => "label-for-unique",
            AuditType::InputTypeInvalid => "input-type-invalid",
            AuditType::InputNoLabel => "input-no-label",
            AuditType::AriaLabelledbyMissing => "aria-labelledby-missing",
        }
    }
}

impl fmt::Display for AuditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuditType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown audit type: {}", s))
    }
}

/// Audit categories, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditCategory {
    Forms,
    Attributes,
    Autocomplete,
    Labels,
    Inputs,
}

impl AuditCategory {
    pub const ALL: &'static [AuditCategory] = &[
        AuditCategory::Forms,
        AuditCategory::Attributes,
        AuditCategory::Autocomplete,
        AuditCategory::Labels,
        AuditCategory::Inputs,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Further reading attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
}

impl Reference {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Why a node was flagged by a containment audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasonKind {
    Heading,
    Interactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason<N = NodeId> {
    #[serde(rename = "type")]
    pub kind: ReasonKind,
    pub node: N,
}

/// Audit-specific evidence attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuditContext<N = NodeId> {
    None,
    Suggestion {
        suggestion: String,
    },
    InvalidAttribute {
        attribute: String,
        suggestion: Option<String>,
    },
    InvalidValue {
        value: String,
        suggestion: Option<String>,
    },
    Duplicates {
        duplicates: Vec<N>,
    },
    Reasons {
        reasons: Vec<Reason<N>>,
    },
    MissingReferences {
        ids: Vec<String>,
    },
}

impl<N> AuditContext<N> {
    /// The suggestion carried by this context, if any.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            AuditContext::Suggestion { suggestion } => Some(suggestion),
            AuditContext::InvalidAttribute { suggestion, .. }
            | AuditContext::InvalidValue { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }

    pub fn duplicates(&self) -> &[N] {
        match self {
            AuditContext::Duplicates { duplicates } => duplicates,
            _ => &[],
        }
    }

    /// Replace every node handle.
    pub fn map_nodes<M>(&self, f: &mut impl FnMut(&N) -> M) -> AuditContext<M> {
        match self {
            AuditContext::None => AuditContext::None,
            AuditContext::Suggestion { suggestion } => AuditContext::Suggestion {
                suggestion: suggestion.clone(),
            },
            AuditContext::InvalidAttribute {
                attribute,
                suggestion,
            } => AuditContext::InvalidAttribute {
                attribute: attribute.clone(),
                suggestion: suggestion.clone(),
            },
            AuditContext::InvalidValue { value, suggestion } => AuditContext::InvalidValue {
                value: value.clone(),
                suggestion: suggestion.clone(),
            },
            AuditContext::Duplicates { duplicates } => AuditContext::Duplicates {
                duplicates: duplicates.iter().map(&mut *f).collect(),
            },
            AuditContext::Reasons { reasons } => AuditContext::Reasons {
                reasons: reasons
                    .iter()
                    .map(|r| Reason {
                        kind: r.kind,
                        node: f(&r.node),
                    })
                    .collect(),
            },
            AuditContext::MissingReferences { ids } => {
                AuditContext::MissingReferences { ids: ids.clone() }
            }
        }
    }
}

/// A flagged node and its evidence.
///
/// Serializes as `{node, context}`. Rendered items (see
/// [`NodeRef`](super::NodeRef)) spread the reference into the item instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditItem<N = NodeId> {
    pub node: N,
    pub context: AuditContext<N>,
}

impl AuditItem<NodeId> {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            context: AuditContext::None,
        }
    }

    pub fn with_context(node: NodeId, context: AuditContext) -> Self {
        Self { node, context }
    }
}

impl Serialize for AuditItem<NodeId> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut item = serializer.serialize_struct("AuditItem", 2)?;
        item.serialize_field("node", &self.node)?;
        item.serialize_field("context", &self.context)?;
        item.end()
    }
}

/// One reported finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = "AuditItem<N>: Serialize"))]
pub struct AuditResult<N = NodeId> {
    pub audit_type: AuditType,
    pub title: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub items: Vec<AuditItem<N>>,
    pub references: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<N> AuditResult<N> {
    /// Replace every node handle in items and their contexts.
    pub fn map_nodes<M>(&self, mut f: impl FnMut(&N) -> M) -> AuditResult<M> {
        AuditResult {
            audit_type: self.audit_type,
            title: self.title.clone(),
            severity: self.severity,
            items: self
                .items
                .iter()
                .map(|item| AuditItem {
                    node: f(&item.node),
                    context: item.context.map_nodes(&mut f),
                })
                .collect(),
            references: self.references.clone(),
            details: self.details.clone(),
        }
    }
}
