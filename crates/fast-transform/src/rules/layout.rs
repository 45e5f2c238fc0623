//! Table presentation toggles: zebra striping, border add, border remove.

use lazy_static::lazy_static;
use regex::Regex;

use crate::anchors::insert_style_block;
use crate::catalog::Applied;

pub const ZEBRA_MARKER: &str = "glyph-style-zebra";
pub const BORDERS_MARKER: &str = "glyph-style-borders";
pub const BORDERS_OFF_MARKER: &str = "glyph-style-borders-off";

lazy_static! {
    static ref ZEBRA_RE: Regex = Regex::new(
        r"(?i)\bzebra\b|\balternat(e|ing)\b.{0,20}\b(rows?|shading|colors?)\b|\bstripe[ds]?\b.{0,20}\brows?\b"
    )
    .unwrap();
    static ref BORDERS_ADD_RE: Regex =
        Regex::new(r"(?i)\b(add|give|put|draw|show|with)\b.{0,30}\bborders?\b").unwrap();
    static ref BORDERS_OFF_RE: Regex = Regex::new(
        r"(?i)\b(remove|delete|drop|hide|strip|no|without)\b.{0,30}\bborders?\b|\bborderless\b"
    )
    .unwrap();
}

pub fn recognize_zebra(prompt: &str) -> bool {
    ZEBRA_RE.is_match(prompt)
}

/// The remove lexicon wins on overlap ("with no borders"), keeping the two
/// border rules mutually exclusive on any single prompt.
pub fn recognize_borders(prompt: &str) -> bool {
    BORDERS_ADD_RE.is_match(prompt) && !BORDERS_OFF_RE.is_match(prompt)
}

pub fn recognize_borders_off(prompt: &str) -> bool {
    BORDERS_OFF_RE.is_match(prompt)
}

pub fn applied_zebra(html: &str) -> bool {
    html.contains(ZEBRA_MARKER)
}

pub fn applied_borders(html: &str) -> bool {
    html.contains(BORDERS_MARKER)
}

pub fn applied_borders_off(html: &str) -> bool {
    html.contains(BORDERS_OFF_MARKER)
}

pub fn apply_zebra(html: &str, _prompt: &str) -> Applied {
    Applied {
        html: insert_style_block(
            html,
            ZEBRA_MARKER,
            "tr:nth-child(even) { background-color: #f2f2f2; }",
        ),
        change: "Added zebra striping to table rows".to_string(),
    }
}

pub fn apply_borders(html: &str, _prompt: &str) -> Applied {
    Applied {
        html: insert_style_block(
            html,
            BORDERS_MARKER,
            "table { border-collapse: collapse; }\ntable, th, td { border: 1px solid #444; }",
        ),
        change: "Added table borders".to_string(),
    }
}

pub fn apply_borders_off(html: &str, _prompt: &str) -> Applied {
    Applied {
        html: insert_style_block(
            html,
            BORDERS_OFF_MARKER,
            "table, th, td { border: none !important; }",
        ),
        change: "Removed table borders".to_string(),
    }
}
