//! Decode issue taxonomy.
//!
//! Nothing inside the decoder is fatal: every failure degrades to an
//! empty or partial [`crate::DecodeOutcome`], so there is no `Err` path
//! on the public API. What callers *do* need is to know what happened —
//! "no structure at all" on twenty consecutive pages is worth alerting
//! on, while one truncation repair is routine. [`DecodeIssue`] carries
//! that signal inside [`crate::DecodeDiagnostics`], leaving the
//! log-or-alert decision to the caller.

use thiserror::Error;

/// A non-fatal condition observed while decoding one page response.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum DecodeIssue {
    /// The raw text contained no fence and no bracket-like structure.
    #[error("no JSON-like structure found in model output ({raw_len} chars)")]
    NoCandidate { raw_len: usize },

    /// A candidate was found but failed strict parsing even after
    /// cosmetic normalization.
    #[error("candidate failed strict parsing: {detail}")]
    StructuralParseFailure { detail: String },

    /// Truncation repair succeeded; the response was cut by the model's
    /// token budget and a dangling partial element was discarded.
    #[error("response truncated: kept {kept} complete elements, dropped {dropped} partial")]
    Truncated { kept: usize, dropped: usize },

    /// Individual array entries were not well-formed records and were
    /// dropped without failing the page.
    #[error("dropped {count} malformed element entries")]
    MalformedElements { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_display() {
        let issue = DecodeIssue::Truncated { kept: 7, dropped: 1 };
        let msg = issue.to_string();
        assert!(msg.contains("7 complete"), "got: {msg}");
        assert!(msg.contains("1 partial"), "got: {msg}");
    }

    #[test]
    fn no_candidate_display() {
        let issue = DecodeIssue::NoCandidate { raw_len: 28 };
        assert!(issue.to_string().contains("28 chars"));
    }

    #[test]
    fn issues_serialize() {
        let issue = DecodeIssue::MalformedElements { count: 2 };
        let json = serde_json::to_string(&issue).unwrap();
        let back: DecodeIssue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, issue);
    }
}
