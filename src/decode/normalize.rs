//! Cosmetic normalization applied before strict parsing.
//!
//! Models regularly emit `[{...},]` — a trailing comma before a closing
//! delimiter — which strict JSON rejects. This pass drops the comma (and
//! any whitespace between it and the closer) while leaving everything
//! else byte-for-byte intact. The rewrite is string-literal-aware via
//! [`LiteralState`], so a text field whose *content* ends in `,]` is
//! never corrupted.

use super::scan::LiteralState;

/// Remove trailing commas immediately preceding `]` or `}`.
pub(crate) fn strip_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut state = LiteralState::Scanning;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if !state.advance(c) {
            out.push(c);
            i += 1;
            continue;
        }
        if c == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && (chars[j] == ']' || chars[j] == '}') {
                // Drop the comma and intervening whitespace; the closer is
                // emitted on the next iteration.
                i = j;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}
