//! Font size, weight, style, and family changes.

use lazy_static::lazy_static;
use regex::Regex;

use crate::anchors::insert_style_block;
use crate::catalog::Applied;

pub const SIZE_UP_MARKER: &str = "glyph-style-font-size-up";
pub const SIZE_DOWN_MARKER: &str = "glyph-style-font-size-down";
pub const BOLD_MARKER: &str = "glyph-style-bold";
pub const ITALIC_MARKER: &str = "glyph-style-italic";
pub const FAMILY_MARKER: &str = "glyph-style-font-family";

/// Fixed alias table; the first matching entry wins, so compound names
/// sit ahead of their substrings (sans-serif before serif).
static FONT_ALIASES: &[(&str, &str)] = &[
    ("sans-serif", "Arial, Helvetica, sans-serif"),
    ("sans serif", "Arial, Helvetica, sans-serif"),
    ("monospace", "'Courier New', Courier, monospace"),
    ("courier", "'Courier New', Courier, monospace"),
    ("georgia", "Georgia, 'Times New Roman', serif"),
    ("times", "'Times New Roman', Times, serif"),
    ("serif", "Georgia, 'Times New Roman', serif"),
    ("arial", "Arial, Helvetica, sans-serif"),
    ("helvetica", "Helvetica, Arial, sans-serif"),
];

lazy_static! {
    static ref SIZE_UP_RE: Regex = Regex::new(
        r"(?i)\b(increase|enlarge)\b.{0,30}\b(font|text)\b|\b(font|text)\b.{0,40}\b(bigger|larger)\b|\b(bigger|larger)\b.{0,20}\b(font|text)\b"
    )
    .unwrap();
    static ref SIZE_DOWN_RE: Regex = Regex::new(
        r"(?i)\b(decrease|reduce|shrink)\b.{0,30}\b(font|text)\b|\b(font|text)\b.{0,40}\bsmaller\b|\bsmaller\b.{0,20}\b(font|text)\b"
    )
    .unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"(?i)\bbold(er)?\b").unwrap();
    static ref ITALIC_RE: Regex = Regex::new(r"(?i)\b(italic|italics|italicize|italicise)\b").unwrap();
    static ref FAMILY_INTENT_RE: Regex =
        Regex::new(r"(?i)\b(font|typeface|use|switch|change|set|make)\b").unwrap();
}

fn font_alias(prompt: &str) -> Option<(&'static str, &'static str)> {
    let lower = prompt.to_lowercase();
    FONT_ALIASES
        .iter()
        .find(|(alias, _)| lower.contains(alias))
        .copied()
}

pub fn recognize_size_up(prompt: &str) -> bool {
    SIZE_UP_RE.is_match(prompt)
}

pub fn recognize_size_down(prompt: &str) -> bool {
    SIZE_DOWN_RE.is_match(prompt)
}

pub fn recognize_bold(prompt: &str) -> bool {
    BOLD_RE.is_match(prompt)
}

pub fn recognize_italic(prompt: &str) -> bool {
    ITALIC_RE.is_match(prompt)
}

pub fn recognize_family(prompt: &str) -> bool {
    font_alias(prompt).is_some() && FAMILY_INTENT_RE.is_match(prompt)
}

pub fn applied_size_up(html: &str) -> bool {
    html.contains(SIZE_UP_MARKER)
}

pub fn applied_size_down(html: &str) -> bool {
    html.contains(SIZE_DOWN_MARKER)
}

pub fn applied_bold(html: &str) -> bool {
    html.contains(BOLD_MARKER)
}

pub fn applied_italic(html: &str) -> bool {
    html.contains(ITALIC_MARKER)
}

pub fn applied_family(html: &str) -> bool {
    html.contains(FAMILY_MARKER)
}

pub fn apply_size_up(html: &str, _prompt: &str) -> Applied {
    Applied {
        html: insert_style_block(html, SIZE_UP_MARKER, "body { font-size: 110%; }"),
        change: "Increased font size to 110%".to_string(),
    }
}

pub fn apply_size_down(html: &str, _prompt: &str) -> Applied {
    Applied {
        html: insert_style_block(html, SIZE_DOWN_MARKER, "body { font-size: 90%; }"),
        change: "Decreased font size to 90%".to_string(),
    }
}

pub fn apply_bold(html: &str, _prompt: &str) -> Applied {
    Applied {
        html: insert_style_block(html, BOLD_MARKER, "body { font-weight: bold; }"),
        change: "Made text bold".to_string(),
    }
}

pub fn apply_italic(html: &str, _prompt: &str) -> Applied {
    Applied {
        html: insert_style_block(html, ITALIC_MARKER, "body { font-style: italic; }"),
        change: "Made text italic".to_string(),
    }
}

pub fn apply_family(html: &str, prompt: &str) -> Applied {
    let (alias, stack) = font_alias(prompt).unwrap_or(("serif", "Georgia, 'Times New Roman', serif"));
    let rule = format!("body {{ font-family: {stack}; }}");
    Applied {
        html: insert_style_block(html, FAMILY_MARKER, &rule),
        change: format!("Changed font to {alias}"),
    }
}
