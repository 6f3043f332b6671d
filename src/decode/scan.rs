//! String-aware structural scanning over raw model text.
//!
//! Everything in the recovery pipeline that walks characters and counts
//! delimiters goes through [`LiteralState`]: a three-state machine
//! (scanning / in-string / escaped) that knows whether the current
//! character is *structural* — i.e. outside any string literal — so that a
//! `]` inside `"a[b]c"` never closes an array. Models emit both `'` and
//! `"` quoted strings, so both open a literal.
//!
//! Regex cannot do this job: matching a closer to its opener requires a
//! depth counter, and skipping quoted content requires escape tracking.
//! One shared state machine keeps the bracket scanner, the trailing-comma
//! normalizer, and the truncation repairer in exact agreement about what
//! counts as structure.

/// Position of the scanner relative to string literals.
///
/// `InString` and `Escaped` carry the active quote character so that a
/// single quote inside a double-quoted string (and vice versa) stays
/// inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LiteralState {
    /// Outside any string literal; delimiters here are structural.
    Scanning,
    /// Inside a string opened by the carried quote character.
    InString(char),
    /// The previous character was a backslash inside a string.
    Escaped(char),
}

impl LiteralState {
    /// Advance over one character.
    ///
    /// Returns `true` when the character is structural: outside a string
    /// literal and not itself a quote that opens one. Callers only count
    /// delimiters when this returns `true`.
    pub(crate) fn advance(&mut self, c: char) -> bool {
        match *self {
            LiteralState::Escaped(quote) => {
                *self = LiteralState::InString(quote);
                false
            }
            LiteralState::InString(quote) => {
                if c == '\\' {
                    *self = LiteralState::Escaped(quote);
                } else if c == quote {
                    *self = LiteralState::Scanning;
                }
                false
            }
            LiteralState::Scanning => {
                if c == '"' || c == '\'' {
                    *self = LiteralState::InString(c);
                    false
                } else {
                    true
                }
            }
        }
    }
}

/// Find the closer matching the opener at byte offset `start`.
///
/// `text[start..]` must begin with `open`. Returns the byte offset of the
/// matching `close`, or `None` when the text ends before depth returns to
/// zero (a truncated value).
pub(crate) fn matching_close(text: &str, start: usize, open: char, close: char) -> Option<usize> {
    let mut state = LiteralState::Scanning;
    let mut depth: usize = 0;
    for (offset, c) in text[start..].char_indices() {
        if !state.advance(c) {
            continue;
        }
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(start + offset);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_flat_array() {
        assert_eq!(matching_close("[1, 2, 3]", 0, '[', ']'), Some(8));
    }

    #[test]
    fn balanced_nested() {
        let s = r#"[{"bbox": [0, 0, 10, 10]}]"#;
        assert_eq!(matching_close(s, 0, '[', ']'), Some(s.len() - 1));
    }

    #[test]
    fn closer_inside_string_ignored() {
        let s = r#"["a]b", "c"]"#;
        assert_eq!(matching_close(s, 0, '[', ']'), Some(s.len() - 1));
    }

    #[test]
    fn opener_inside_single_quoted_string_ignored() {
        let s = "['x[y', 1]";
        assert_eq!(matching_close(s, 0, '[', ']'), Some(s.len() - 1));
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let s = r#"["a\"]b"]"#;
        assert_eq!(matching_close(s, 0, '[', ']'), Some(s.len() - 1));
    }

    #[test]
    fn unbalanced_reports_none() {
        assert_eq!(matching_close("[1, 2", 0, '[', ']'), None);
        assert_eq!(matching_close(r#"{"a": [1, 2]"#, 0, '{', '}'), None);
    }

    #[test]
    fn scan_from_offset() {
        let s = r#"prose {"a": 1} more"#;
        let start = s.find('{').unwrap();
        assert_eq!(matching_close(s, start, '{', '}'), Some(s.find('}').unwrap()));
    }

    #[test]
    fn multibyte_text_inside_strings() {
        let s = r#"[{"text": "печать №7 [офис]"}]"#;
        assert_eq!(matching_close(s, 0, '[', ']'), Some(s.len() - 1));
    }
}
