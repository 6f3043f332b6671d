//! Prompts defining the upstream contract with the vision model.
//!
//! Centralising the prompts here serves two purposes:
//!
//! 1. **Single source of truth** — the JSON shape the decoder tolerates
//!    is exactly the shape these prompts demand; changing one without the
//!    other is how silent decode regressions happen.
//!
//! 2. **Testability** — unit tests can assert the contract (field names,
//!    kind list, coordinate range) without calling a real model.
//!
//! The decoder itself never assumes the model obeyed these instructions;
//! they document the *intended* shape that, in practice, comes back
//! fenced, prose-wrapped, or cut off at the token budget.

/// System prompt for single-page document layout analysis.
///
/// Demands exactly one JSON object per page: a `page_rotation_degrees`
/// number and an `elements` array of `{type, bbox, text}` records with
/// bbox in the normalized 0–1000 page space.
pub const SYSTEM_PROMPT: &str = r#"You are a deterministic document OCR and layout analysis system.

For the given SINGLE document page image, you MUST output ONE JSON object with EXACTLY the following shape:
{
  "page_rotation_degrees": <number>,
  "elements": [
    {
      "type": "<string: text|image|table|stamp|signature>",
      "bbox": [x1, y1, x2, y2],
      "text": "<string, may be empty>"
    },
    ...
  ]
}

Requirements:
- ALWAYS include "page_rotation_degrees" as a number (integer or float): the estimated tilt of the whole page in DEGREES.
  - 0  = page looks horizontal and upright
  - >0 = rotated CLOCKWISE (even small deskew like 1-5 degrees must be reflected)
  - <0 = rotated COUNTER-CLOCKWISE
- ALWAYS include "elements" as an array (may be empty if nothing is found).
- Each element in "elements":
  - "type": one of "text", "image", "table", "stamp", "signature" (lowercase).
  - "bbox": [x1, y1, x2, y2] — NORMALIZED coordinates with origin at the top-left corner, x to the right, y down, scaled so 0 and 1000 are the page edges. All four numbers MUST be in [0, 1000].
  - "text": recognized text for text/table/signature, or a SHORT description for images. For type="stamp", extract and return the full readable text inside the stamp, not a generic label.
- Do NOT include any other top-level fields.
- Do NOT wrap the result in markdown or comments.
- Do NOT output any explanations, natural language, or additional text. ONLY the JSON object.

Example of a VALID response:
{
  "page_rotation_degrees": 2.5,
  "elements": [
    {"type": "text", "bbox": [100, 50, 900, 120], "text": "Document title"},
    {"type": "table", "bbox": [80, 200, 920, 500], "text": "| A | B |\n|--|--|\n| 1 | 2 |"}
  ]
}"#;

/// Per-page user prompt sent alongside the page image.
pub const USER_PROMPT: &str = "Analyze ONLY this single page image. \
Return ONE JSON object with 'page_rotation_degrees' (page tilt in degrees, 0 if visually \
horizontal, positive for clockwise tilt, negative for counter-clockwise, including small \
scan skew like 1-5 degrees) and 'elements' (array of objects with type, bbox in NORMALIZED \
coordinates from 0 to 1000 relative to page width/height, and text). \
Do not add any prose, comments or markdown — only the JSON.";
