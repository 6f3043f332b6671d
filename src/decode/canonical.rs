//! Per-record canonicalization after structural recovery.
//!
//! Structural recovery hands back loose `serde_json::Value`s; this pass
//! turns them into typed [`ElementRecord`]s and applies the per-record
//! contract: the page number always comes from the caller, `type` is
//! lowercased, and the legacy `content` key is aliased onto `text`.
//! Entries that are not record-shaped at all (a stray string or number in
//! the array) are dropped and counted — one bad entry never costs the
//! page.

use serde_json::Value;
use tracing::debug;

use crate::record::ElementRecord;

/// Convert recovered element values into canonical records.
///
/// Returns the records plus the number of entries dropped as malformed.
pub(crate) fn canonicalize_elements(values: Vec<Value>, page: u32) -> (Vec<ElementRecord>, usize) {
    let mut records = Vec::with_capacity(values.len());
    let mut dropped = 0usize;
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<ElementRecord>(value) {
            Ok(mut record) => {
                record.page = page;
                record.kind.make_ascii_lowercase();
                alias_content_into_text(&mut record);
                records.push(record);
            }
            Err(err) => {
                debug!(page, index, %err, "dropping malformed element entry");
                dropped += 1;
            }
        }
    }
    (records, dropped)
}

/// Copy a string `content` field into `text` when `text` is absent or
/// whitespace-only. `content` stays in the extras so nothing is lost.
fn alias_content_into_text(record: &mut ElementRecord) {
    let text_missing = record
        .text
        .as_deref()
        .map_or(true, |t| t.trim().is_empty());
    if !text_missing {
        return;
    }
    if let Some(Value::String(content)) = record.extra.get("content") {
        record.text = Some(content.clone());
    }
}
