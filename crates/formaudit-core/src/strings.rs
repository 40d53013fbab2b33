//! Small string helpers shared by capture and reporting.

/// Suffix appended by [`truncate`].
pub const ELLIPSIS: char = '…';

/// Keep at most `max` characters, appending [`ELLIPSIS`] when anything was cut.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + ELLIPSIS.len_utf8());
            out.push_str(&s[..byte_idx]);
            out.push(ELLIPSIS);
            out
        }
        None => s.to_string(),
    }
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn condense_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"1 field"`, `"3 fields"`.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 5), "hello…");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("ñañaña", 3), "ñañ…");
    }

    #[test]
    fn test_condense_whitespace() {
        assert_eq!(condense_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(condense_whitespace(" \n "), "");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "field", "fields"), "1 field");
        assert_eq!(pluralize(0, "field", "fields"), "0 fields");
        assert_eq!(pluralize(2, "match", "matches"), "2 matches");
    }
}
