//! Boundary-aware node paths and their CSS selector form.
//!
//! A path is a `/`-joined list of segments from the root down to a node.
//! Boundary markers appear verbatim (`#shadow-root`, `#document`) and must be
//! handled by whoever re-roots the selector in the right shadow tree or frame.

use super::{NodeId, Tree};

impl Tree {
    /// Path from the root to `id`.
    pub fn path(&self, id: NodeId) -> String {
        let mut segments: Vec<String> = std::iter::once(id)
            .chain(self.ancestors(id))
            .map(|n| self.segment(n))
            .collect();
        segments.reverse();
        segments.join("/")
    }

    fn segment(&self, id: NodeId) -> String {
        let node = &self[id];
        if let Some(kind) = node.kind {
            return kind.as_str().to_string();
        }
        let Some(name) = node.name.as_deref() else {
            return String::new();
        };

        let same_name: Vec<NodeId> = match node.parent {
            Some(parent) => self[parent]
                .children
                .iter()
                .copied()
                .filter(|sibling| self[*sibling].is(name))
                .collect(),
            None => vec![id],
        };

        if same_name.len() <= 1 {
            return name.to_string();
        }
        if let Some(escaped) = node.attr("id").and_then(css_escape_ident) {
            return format!("{}#{}", name, escaped);
        }
        let index = same_name.iter().position(|s| *s == id).unwrap_or(0);
        format!("{}[{}]", name, index)
    }
}

/// Escape `id` for use after `#` in a selector.
///
/// Returns `None` when the leading characters can never start an identifier
/// (empty, digit, `-` + digit, lone `-`). Other disallowed characters become
/// `\<hex> `.
pub fn css_escape_ident(id: &str) -> Option<String> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return None,
        (Some(c), _) if c.is_ascii_digit() => return None,
        (Some('-'), None) => return None,
        (Some('-'), Some(c)) if c.is_ascii_digit() => return None,
        _ => {}
    }

    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' || u32::from(c) >= 0xA0 {
            out.push(c);
        } else {
            out.push_str(&format!("\\{:x} ", u32::from(c)));
        }
    }
    Some(out)
}

/// Convert a path into a `>`-joined selector, rewriting `name[i]` as
/// `name:nth-of-type(i+1)`.
pub fn path_to_query_selector(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(indexed_segment_to_selector)
        .collect::<Vec<_>>()
        .join(" > ")
}

fn indexed_segment_to_selector(segment: &str) -> String {
    let parsed = segment
        .strip_suffix(']')
        .and_then(|rest| rest.rsplit_once('['))
        .and_then(|(name, index)| index.parse::<usize>().ok().map(|i| (name, i)));

    match parsed {
        Some((name, index)) if !name.is_empty() => {
            format!("{}:nth-of-type({})", name, index + 1)
        }
        _ => segment.to_string(),
    }
}
