//! The per-page recovery pipeline.
//!
//! One call, one page, one pass:
//!
//! ```text
//! raw text
//!  │
//!  ├─ 1. Locate    cut out the candidate (fence > bare value > scan)
//!  ├─ 2. Normalize drop trailing commas before closers
//!  ├─ 3. Parse     strict serde_json parse of the candidate
//!  ├─ 4. Repair    on failure: truncation repair / elements-span rescue
//!  ├─ 5. Shape     object-or-array → (element values, rotation)
//!  └─ 6. Canon     typed records, page stamp, content→text alias
//! ```
//!
//! Every stage is a pure synchronous transformation and every failure
//! degrades rather than propagates: the worst possible outcome of a
//! decode is the empty outcome. That makes the whole pipeline trivially
//! safe to run from parallel page workers — no state survives a call.

mod candidate;
mod canonical;
mod normalize;
mod repair;
mod response;
mod scan;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::DecodeIssue;
use crate::outcome::{DecodeDiagnostics, DecodeOutcome};
use crate::record::ElementRecord;

use candidate::locate_candidate;
use canonical::canonicalize_elements;
use normalize::strip_trailing_commas;
use repair::close_truncated_array;
use response::{elements_array_span, normalize_value, rotation_from_raw};

/// Decode one page's raw model response into layout records.
///
/// `page` is the caller's 1-based page number and is stamped onto every
/// record, overriding anything the model claimed.
///
/// This function is total: cosmetic damage (fences, prose, single
/// quotes, trailing commas) is repaired, truncated arrays are closed
/// after their last complete element, and input with no structure at all
/// yields the empty outcome — never a panic, never an `Err`.
pub fn decode_page_response(raw: &str, page: u32) -> DecodeOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DecodeOutcome::empty();
    }

    let Some(candidate) = locate_candidate(trimmed) else {
        debug!(page, raw_len = trimmed.len(), "no JSON-like candidate in model output");
        let mut outcome = DecodeOutcome::empty();
        outcome
            .diagnostics
            .issues
            .push(DecodeIssue::NoCandidate { raw_len: trimmed.len() });
        return outcome;
    };

    let mut diagnostics = DecodeDiagnostics {
        candidate_found: true,
        ..DecodeDiagnostics::default()
    };

    let normalized = strip_trailing_commas(candidate);
    let (values, rotation) = match serde_json::from_str::<Value>(&normalized) {
        Ok(value) => normalize_value(value),
        Err(err) => {
            debug!(page, %err, "strict parse failed, attempting recovery");
            diagnostics.issues.push(DecodeIssue::StructuralParseFailure {
                detail: err.to_string(),
            });
            recover_degraded(trimmed, candidate, page, &mut diagnostics)
        }
    };

    if rotation != 0.0 {
        info!(page, rotation, "detected page rotation");
    }

    let (elements, dropped) = canonicalize_elements(values, page);
    if dropped > 0 {
        diagnostics.dropped_malformed = dropped;
        diagnostics
            .issues
            .push(DecodeIssue::MalformedElements { count: dropped });
    }
    if elements.is_empty() {
        warn!(page, raw_len = trimmed.len(), "no elements recovered from model response");
    }

    DecodeOutcome {
        elements,
        rotation_degrees: rotation,
        diagnostics,
    }
}

/// Decode a whole document's worth of page responses, in order.
///
/// Pages are numbered from 1 in iteration order; the per-page outcomes
/// are flattened into one element sequence for document-level consumers.
pub fn decode_all_pages<'a>(responses: impl IntoIterator<Item = &'a str>) -> Vec<ElementRecord> {
    let mut all_elements = Vec::new();
    for (index, raw) in responses.into_iter().enumerate() {
        let page = index as u32 + 1;
        let outcome = decode_page_response(raw, page);
        all_elements.extend(outcome.elements);
    }
    all_elements
}

/// Recovery path for a candidate that failed strict parsing.
///
/// Rotation is recovered from the raw text by pattern match first, so a
/// truncated object never loses a rotation that appeared before the cut.
/// Element recovery then depends on candidate shape: array-shaped
/// candidates go straight to truncation repair; object-shaped ones have
/// their `elements` array span pulled out and rescued as if it were a
/// standalone array.
fn recover_degraded(
    raw: &str,
    candidate: &str,
    page: u32,
    diagnostics: &mut DecodeDiagnostics,
) -> (Vec<Value>, f64) {
    let rotation = rotation_from_raw(raw);

    if candidate.trim_start().starts_with('[') {
        if let Some(values) = repair_and_parse(candidate, page, diagnostics) {
            return (values, rotation);
        }
        return (Vec::new(), rotation);
    }

    if let Some(span) = elements_array_span(candidate) {
        let normalized = strip_trailing_commas(span);
        if let Ok(Value::Array(values)) = serde_json::from_str::<Value>(&normalized) {
            return (values, rotation);
        }
        if let Some(values) = repair_and_parse(span, page, diagnostics) {
            return (values, rotation);
        }
    }

    (Vec::new(), rotation)
}

/// Close a truncated array and strictly parse the result.
fn repair_and_parse(
    span: &str,
    page: u32,
    diagnostics: &mut DecodeDiagnostics,
) -> Option<Vec<Value>> {
    let repair = close_truncated_array(span)?;
    match serde_json::from_str::<Value>(&strip_trailing_commas(&repair.repaired)) {
        Ok(Value::Array(values)) => {
            let dropped = usize::from(repair.dangling);
            info!(
                page,
                kept = repair.complete,
                dropped,
                "response truncated by token budget, array repaired"
            );
            diagnostics.repaired = true;
            diagnostics.discarded_partial = dropped;
            diagnostics.issues.push(DecodeIssue::Truncated {
                kept: repair.complete,
                dropped,
            });
            Some(values)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_object_decodes_directly() {
        let raw = r#"{"page_rotation_degrees": 1.5, "elements": [{"type": "text", "bbox": [0, 0, 100, 40], "text": "Title"}]}"#;
        let outcome = decode_page_response(raw, 1);
        assert_eq!(outcome.elements.len(), 1);
        assert_eq!(outcome.rotation_degrees, 1.5);
        assert!(outcome.diagnostics.candidate_found);
        assert!(!outcome.diagnostics.repaired);
    }

    #[test]
    fn truncated_object_recovers_rotation_and_elements() {
        let raw = r#"{"page_rotation_degrees": -2, "elements": [{"type": "text", "text": "a"}, {"type": "text", "text": "b"}, {"type": "tab"#;
        let outcome = decode_page_response(raw, 4);
        assert_eq!(outcome.rotation_degrees, -2.0);
        assert_eq!(outcome.elements.len(), 2);
        assert!(outcome.diagnostics.repaired);
        assert_eq!(outcome.diagnostics.discarded_partial, 1);
        assert!(outcome.elements.iter().all(|e| e.page == 4));
    }

    #[test]
    fn whole_document_flattens_with_page_numbers() {
        let pages = [
            r#"[{"type": "text", "text": "p1"}]"#,
            "nothing here",
            r#"[{"type": "text", "text": "p3a"}, {"type": "text", "text": "p3b"}]"#,
        ];
        let elements = decode_all_pages(pages);
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].page, 1);
        assert_eq!(elements[1].page, 3);
        assert_eq!(elements[2].page, 3);
    }

    #[test]
    fn diagnostics_track_failure_chain() {
        let outcome = decode_page_response("{ not json at all [", 1);
        assert!(outcome.elements.is_empty());
        assert!(outcome.diagnostics.candidate_found);
        assert!(outcome
            .diagnostics
            .issues
            .iter()
            .any(|i| matches!(i, DecodeIssue::StructuralParseFailure { .. })));
    }
}
