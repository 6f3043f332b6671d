//! Decode results: the recovered structure plus what it took to get it.

use serde::{Deserialize, Serialize};

use crate::error::DecodeIssue;
use crate::record::ElementRecord;

/// The result of decoding one page's raw model response.
///
/// Always fully constructed: a page where nothing usable was found yields
/// the empty outcome (`elements == []`, `rotation_degrees == 0.0`), never
/// an error. Check [`DecodeDiagnostics`] to distinguish "the page was
/// genuinely empty" from "the response was unusable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeOutcome {
    /// Recovered layout records, in the model's reading order.
    pub elements: Vec<ElementRecord>,
    /// Estimated page tilt in degrees; positive = clockwise.
    pub rotation_degrees: f64,
    /// What the recovery pipeline observed and did.
    pub diagnostics: DecodeDiagnostics,
}

impl DecodeOutcome {
    /// The terminal fallback: nothing usable, rotation 0.
    pub(crate) fn empty() -> Self {
        DecodeOutcome {
            elements: Vec::new(),
            rotation_degrees: 0.0,
            diagnostics: DecodeDiagnostics::default(),
        }
    }
}

/// Observability payload for one decode call.
///
/// The decoder itself never logs at a level above `debug`/`info`; callers
/// that want alerting (for example "N consecutive unusable pages") build
/// it from these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeDiagnostics {
    /// A bracket-like candidate substring was located in the raw text.
    pub candidate_found: bool,
    /// Strict parsing only succeeded after truncation repair.
    pub repaired: bool,
    /// Dangling partial elements discarded by truncation repair.
    pub discarded_partial: usize,
    /// Array entries dropped because they were not well-formed records.
    pub dropped_malformed: usize,
    /// Conditions worth surfacing in the caller's logs.
    pub issues: Vec<DecodeIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outcome_is_default_shaped() {
        let outcome = DecodeOutcome::empty();
        assert!(outcome.elements.is_empty());
        assert_eq!(outcome.rotation_degrees, 0.0);
        assert_eq!(outcome.diagnostics, DecodeDiagnostics::default());
    }

    #[test]
    fn outcome_serializes_with_diagnostics() {
        let outcome = DecodeOutcome::empty();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["rotation_degrees"], 0.0);
        assert_eq!(json["diagnostics"]["candidate_found"], false);
    }
}
