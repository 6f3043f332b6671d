//! Response normalization: parsed value → canonical (elements, rotation).
//!
//! The endpoint is asked for `{"page_rotation_degrees": n, "elements":
//! [...]}` but may answer with a bare array, an object with `elements`
//! set to something that is not an array, a rotation encoded as a string,
//! or an object truncated before its closing brace. This module flattens
//! all of those into the one shape downstream code consumes.
//!
//! Rotation recovery is deliberately decoupled from element recovery: the
//! rotation field appears near the start of the object, so even a badly
//! truncated response usually still carries it, and a regex over the raw
//! text gets it back without needing the object to parse.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Canonicalize a strictly-parsed value into `(element values, rotation)`.
///
/// Rotation defaults to `0.0` whenever it is absent or uncoercible; a bad
/// rotation never blocks element extraction, and a bad `elements` field
/// never blocks rotation.
pub(crate) fn normalize_value(value: Value) -> (Vec<Value>, f64) {
    match value {
        Value::Array(items) => (items, 0.0),
        Value::Object(mut map) => {
            let rotation = map
                .get("page_rotation_degrees")
                .map_or(0.0, coerce_rotation);
            let elements = match map.remove("elements") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            (elements, rotation)
        }
        _ => (Vec::new(), 0.0),
    }
}

/// Coerce a rotation field to degrees. Accepts JSON numbers and numeric
/// strings (models produce both); anything else is `0.0`.
fn coerce_rotation(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

static RE_ROTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']?page_rotation_degrees["']?\s*:\s*(-?\d+(?:\.\d+)?)"#).unwrap()
});

/// Recover `page_rotation_degrees` from raw text by pattern match.
///
/// Used when the outer object failed strict parsing (usually truncation).
pub(crate) fn rotation_from_raw(raw: &str) -> f64 {
    RE_ROTATION
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Locate the span of the `elements` array inside an unparseable object
/// candidate, from its `[` to the end of the candidate.
///
/// The key is searched quoted first (`"elements"`, then `'elements'`),
/// then bare, matching how leniently the rest of the pipeline treats
/// quoting. The returned span is re-fed through the array recovery path
/// as if it were a standalone candidate.
pub(crate) fn elements_array_span(candidate: &str) -> Option<&str> {
    let key = ["\"elements\"", "'elements'", "elements"]
        .iter()
        .find_map(|k| candidate.find(k).map(|i| i + k.len()))?;
    let start = candidate[key..].find('[')? + key;
    Some(&candidate[start..])
}
