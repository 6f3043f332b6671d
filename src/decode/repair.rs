//! Truncation repair for array-shaped candidates.
//!
//! When the model exhausts its output-token budget the JSON stops
//! mid-structure, typically inside the Nth element of the `elements`
//! array. Every element *before* the cut is still intact, so rather than
//! discarding the page we re-scan the text, remember where the last
//! complete top-level element ended, cut there, and close the array.
//!
//! "Complete top-level element" means a `}` seen while array depth is 1
//! and object depth has just returned to 0 — the close of one element
//! object directly inside the outer array. Depth counters only move on
//! structural characters ([`LiteralState`]), so braces inside text
//! content never fool the scan.

use super::scan::LiteralState;

/// Result of a successful truncation repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArrayRepair {
    /// The candidate cut after its last complete element, plus `\n]`.
    pub repaired: String,
    /// Number of complete top-level elements retained.
    pub complete: usize,
    /// Whether a dangling, partially-emitted element was discarded.
    pub dangling: bool,
}

/// Cut a truncated array after its last complete element and close it.
///
/// Returns `None` when the input is not array-shaped or no element ever
/// completed (nothing worth salvaging).
pub(crate) fn close_truncated_array(candidate: &str) -> Option<ArrayRepair> {
    let s = candidate.trim();
    if !s.starts_with('[') {
        return None;
    }

    let mut state = LiteralState::Scanning;
    let mut array_depth: i32 = 0;
    let mut object_depth: i32 = 0;
    let mut last_complete_end: Option<usize> = None;
    let mut complete: usize = 0;
    let mut opened: usize = 0;

    for (i, c) in s.char_indices() {
        if !state.advance(c) {
            continue;
        }
        match c {
            '[' => array_depth += 1,
            ']' => array_depth -= 1,
            '{' => {
                if array_depth == 1 && object_depth == 0 {
                    opened += 1;
                }
                object_depth += 1;
            }
            '}' => {
                object_depth -= 1;
                if array_depth == 1 && object_depth == 0 {
                    last_complete_end = Some(i);
                    complete += 1;
                }
            }
            _ => {}
        }
    }

    let end = last_complete_end?;
    let mut repaired = String::with_capacity(end + 3);
    repaired.push_str(&s[..=end]);
    repaired.push_str("\n]");
    Some(ArrayRepair {
        repaired,
        complete,
        dangling: opened > complete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_mid_second_object() {
        let s = r#"[{"type":"text","bbox":[0,0,10,10],"text":"a"},{"type":"text","bbox":[0,0,10,1"#;
        let rep = close_truncated_array(s).unwrap();
        assert_eq!(rep.complete, 1);
        assert!(rep.dangling);
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&rep.repaired).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["text"], "a");
    }

    #[test]
    fn cut_inside_string_value() {
        let s = r#"[{"text": "first"}, {"text": "second half is cu"#;
        let rep = close_truncated_array(s).unwrap();
        assert_eq!(rep.complete, 1);
        assert!(rep.dangling);
        assert!(serde_json::from_str::<serde_json::Value>(&rep.repaired).is_ok());
    }

    #[test]
    fn cut_between_elements_keeps_all() {
        let s = r#"[{"a": 1}, {"b": 2},"#;
        let rep = close_truncated_array(s).unwrap();
        assert_eq!(rep.complete, 2);
        assert!(!rep.dangling);
        assert_eq!(rep.repaired, "[{\"a\": 1}, {\"b\": 2}\n]");
    }

    #[test]
    fn braces_inside_strings_ignored() {
        let s = r#"[{"text": "curly } brace"}, {"text": "cut {"#;
        let rep = close_truncated_array(s).unwrap();
        assert_eq!(rep.complete, 1);
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&rep.repaired).unwrap();
        assert_eq!(parsed[0]["text"], "curly } brace");
    }

    #[test]
    fn nested_bbox_arrays_do_not_confuse_depth() {
        let s = r#"[{"bbox": [0, 0, 5, 5]}, {"bbox": [1, 1"#;
        let rep = close_truncated_array(s).unwrap();
        assert_eq!(rep.complete, 1);
        assert!(rep.dangling);
    }

    #[test]
    fn no_complete_element_is_unrepairable() {
        assert_eq!(close_truncated_array(r#"[{"type":"text","bbox":[0,0,1,1"#), None);
        assert_eq!(close_truncated_array("["), None);
    }

    #[test]
    fn non_array_input_is_rejected() {
        assert_eq!(close_truncated_array(r#"{"elements": []}"#), None);
        assert_eq!(close_truncated_array("plain text"), None);
    }
}
