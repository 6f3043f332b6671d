//! The canonical page-layout record produced by decoding.
//!
//! Records are deliberately loose at the boundary: the model's output is
//! duck-typed, so only the fields this crate actually reasons about are
//! named, and everything else flows through `extra` untouched. Downstream
//! consumers (markdown assembly, overlay drawing) are therefore never
//! broken by a model that invents additional keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Element kinds the upstream contract enumerates.
///
/// Decoding does not enforce this list — an unrecognized `type` is passed
/// through lowercased — but consumers use it to pick placeholders and
/// overlay colors.
pub const KNOWN_KINDS: [&str; 5] = ["text", "image", "table", "stamp", "signature"];

/// One recognized layout unit on a page.
///
/// `bbox` is preserved exactly as the model sent it (including garbage);
/// use [`ElementRecord::bounding_box`] to read it as validated geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Element type, lowercased. `"text"` when the model omitted it.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// `[x1, y1, x2, y2]` in the 0–1000 page space, origin top-left.
    /// Kept as raw JSON — presence and shape are a consumer concern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Value>,

    /// Recognized or describing text. Aliased from a legacy `content`
    /// field when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// 1-based page number. Always stamped by the decoder from the
    /// caller's page argument, never trusted from model output.
    #[serde(default)]
    pub page: u32,

    /// Unrecognized fields, preserved opaquely.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn default_kind() -> String {
    "text".to_string()
}

impl ElementRecord {
    /// Whether `kind` is one of the kinds the upstream contract names.
    pub fn is_known_kind(&self) -> bool {
        KNOWN_KINDS.contains(&self.kind.as_str())
    }

    /// Read `bbox` as validated geometry.
    ///
    /// Returns `None` unless `bbox` is an array with at least four
    /// numeric entries; extra entries are ignored. Degeneracy is left to
    /// [`BoundingBox::is_degenerate`] so callers can decide whether to
    /// skip or report such boxes.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let items = self.bbox.as_ref()?.as_array()?;
        if items.len() < 4 {
            return None;
        }
        let mut coords = [0.0_f64; 4];
        for (slot, item) in coords.iter_mut().zip(items) {
            *slot = item.as_f64()?;
        }
        Some(BoundingBox {
            x1: coords[0],
            y1: coords[1],
            x2: coords[2],
            y2: coords[3],
        })
    }
}

/// An element's box in the normalized 0–1000 page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// A box with no area is unrenderable and usually a model slip.
    pub fn is_degenerate(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }
}
