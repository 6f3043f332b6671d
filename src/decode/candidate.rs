//! Candidate location: find the substring most likely to be the JSON value.
//!
//! The endpoint is instructed to answer with nothing but one JSON object,
//! yet real responses arrive wrapped in markdown fences, prefixed with
//! "Here is the structure you asked for:", or suffixed with apologies.
//! The locator's job is purely positional — cut out the span that *looks*
//! like the value and let later stages worry about whether it parses.
//!
//! Priority order:
//! 1. A fenced code block anywhere in the text. The model was told not to
//!    fence, so a fence is a deliberate act and its inner content is the
//!    highest-confidence signal, trusted over any surrounding prose.
//! 2. The trimmed text itself, when it already starts with `{` or `[`.
//! 3. The earliest `{` or `[` plus a bracket scan for its closer. When
//!    depths never balance (truncated output) fall back to the span up to
//!    the last matching closer, or to end-of-text when no closer exists —
//!    a best-effort span that the truncation repairer can still mine.

use once_cell::sync::Lazy;
use regex::Regex;

use super::scan::matching_close;

static RE_FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").unwrap());

/// Locate the JSON candidate inside raw model output.
///
/// Returns `None` only when the text contains no fence and no `{`/`[` at
/// all — i.e. nothing bracket-like to even attempt recovery on.
pub(crate) fn locate_candidate(raw: &str) -> Option<&str> {
    let raw = raw.trim();

    if let Some(caps) = RE_FENCED_BLOCK.captures(raw) {
        return Some(caps.get(1).map_or("", |m| m.as_str()).trim());
    }

    if raw.starts_with('{') || raw.starts_with('[') {
        return Some(raw);
    }

    let brace = raw.find('{');
    let bracket = raw.find('[');
    let start = match (brace, bracket) {
        (Some(b), Some(k)) => b.min(k),
        (Some(b), None) => b,
        (None, Some(k)) => k,
        (None, None) => return None,
    };
    let (open, close) = if raw[start..].starts_with('{') {
        ('{', '}')
    } else {
        ('[', ']')
    };

    if let Some(end) = matching_close(raw, start, open, close) {
        return Some(&raw[start..=end]);
    }
    // Truncated: grab everything up to the last closer of the right kind,
    // or to end-of-text when the value was cut before any closer.
    match raw.rfind(close) {
        Some(last) if last > start => Some(&raw[start..=last]),
        _ => Some(&raw[start..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_wins_over_prose() {
        let raw = "Sure, here you go:\n```json\n[{\"type\": \"text\"}]\n```\nHope that helps!";
        assert_eq!(locate_candidate(raw), Some("[{\"type\": \"text\"}]"));
    }

    #[test]
    fn fence_without_language_tag() {
        let raw = "```\n{\"elements\": []}\n```";
        assert_eq!(locate_candidate(raw), Some("{\"elements\": []}"));
    }

    #[test]
    fn bare_object_passes_through() {
        let raw = "  {\"elements\": [], \"page_rotation_degrees\": 0}  ";
        assert_eq!(locate_candidate(raw), Some(raw.trim()));
    }

    #[test]
    fn bare_array_passes_through() {
        assert_eq!(locate_candidate("[1, 2]"), Some("[1, 2]"));
    }

    #[test]
    fn prose_prefix_stripped_via_scan() {
        let raw = "The page contains: [{\"type\": \"text\"}] as requested.";
        assert_eq!(locate_candidate(raw), Some("[{\"type\": \"text\"}]"));
    }

    #[test]
    fn earliest_opener_preferred() {
        let raw = "x {\"a\": [1]} y";
        assert_eq!(locate_candidate(raw), Some("{\"a\": [1]}"));
    }

    #[test]
    fn brackets_inside_strings_do_not_end_span() {
        let raw = "result: [{\"text\": \"a[b]c\"}] done";
        assert_eq!(locate_candidate(raw), Some("[{\"text\": \"a[b]c\"}]"));
    }

    #[test]
    fn unbalanced_falls_back_to_last_closer() {
        let raw = "note [1, [2, 3] trailing";
        assert_eq!(locate_candidate(raw), Some("[1, [2, 3]"));
    }

    #[test]
    fn unbalanced_without_closer_runs_to_end() {
        let raw = "note {\"elements\": [\"cut";
        assert_eq!(locate_candidate(raw), Some("{\"elements\": [\"cut"));
    }

    #[test]
    fn no_structure_at_all() {
        assert_eq!(locate_candidate("I cannot process this image."), None);
        assert_eq!(locate_candidate(""), None);
    }
}
