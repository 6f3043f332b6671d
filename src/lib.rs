//! # layout-decode
//!
//! Resilient decoder for vision-LLM document OCR responses: turns the raw
//! free-form text a generative endpoint returns for one page into a
//! validated sequence of page-layout records.
//!
//! ## Why this crate?
//!
//! The endpoint is *instructed* to return exactly one JSON object per
//! page. In practice the text that comes back is wrapped in prose or
//! markdown fences, uses single quotes or trailing commas, arrives as a
//! bare array instead of the requested object — and, worst of all, is cut
//! off mid-structure when the model exhausts its output-token budget. A
//! strict `serde_json::from_str` throws away every one of those pages.
//! This crate recovers as much structure as the text still carries, and
//! only reports "nothing usable" when the text is not JSON-like at all.
//!
//! ## Pipeline Overview
//!
//! ```text
//! raw model text
//!  │
//!  ├─ 1. Locate    fence strip / opener search / bracket scan
//!  ├─ 2. Normalize trailing-comma removal (string-literal aware)
//!  ├─ 3. Parse     strict serde_json parse
//!  ├─ 4. Repair    close truncated arrays after the last complete element
//!  ├─ 5. Shape     object-or-array → (elements, rotation)
//!  └─ 6. Canon     typed records, page stamp, content→text alias
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use layout_decode::decode_page_response;
//!
//! // Fenced, prose-wrapped, truncated — still decodes.
//! let raw = "Here is the page:\n```json\n[{\"type\": \"text\", \"bbox\": [0, 0, 100, 40], \"text\": \"Title\"}]\n```";
//! let outcome = decode_page_response(raw, 1);
//! assert_eq!(outcome.elements.len(), 1);
//! assert_eq!(outcome.elements[0].page, 1);
//! assert_eq!(outcome.rotation_degrees, 0.0);
//! ```
//!
//! ## Guarantees
//!
//! * **Total**: decoding never panics and never returns `Err` — the worst
//!   outcome is the empty [`DecodeOutcome`]. Failure detail travels in
//!   [`DecodeDiagnostics`] for the caller to log.
//! * **Pure**: identical input always yields an identical outcome; no
//!   state survives a call, so pages can be decoded from parallel workers
//!   without synchronization.
//! * **Order- and page-faithful**: element order is the model's reading
//!   order, and every record's `page` is the caller's, never the model's.
//!
//! Out of scope: rasterizing pages, calling the model endpoint, and
//! rendering Markdown or bbox overlays. Those live with the surrounding
//! system; this crate is the syntax/structure recovery layer between
//! them.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod decode;
pub mod error;
pub mod outcome;
pub mod prompts;
pub mod record;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use decode::{decode_all_pages, decode_page_response};
pub use error::DecodeIssue;
pub use outcome::{DecodeDiagnostics, DecodeOutcome};
pub use record::{BoundingBox, ElementRecord, KNOWN_KINDS};
