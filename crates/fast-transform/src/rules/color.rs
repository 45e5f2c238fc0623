//! Color changes for header, background, and body text.
//!
//! Three separate rules sharing one color vocabulary: a fixed named-color
//! table plus `#hex` literals. A prompt with no recognizable color term
//! matches none of them.

use lazy_static::lazy_static;
use regex::Regex;

use crate::anchors::insert_style_block;
use crate::catalog::Applied;

pub const HEADER_MARKER: &str = "glyph-style-header-color";
pub const BACKGROUND_MARKER: &str = "glyph-style-background-color";
pub const TEXT_MARKER: &str = "glyph-style-text-color";

static COLOR_TABLE: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#c0392b"),
    ("green", "#27ae60"),
    ("blue", "#2980b9"),
    ("navy", "#001f3f"),
    ("teal", "#39cccc"),
    ("purple", "#8e44ad"),
    ("maroon", "#85144b"),
    ("olive", "#3d9970"),
    ("yellow", "#f1c40f"),
    ("orange", "#e67e22"),
    ("brown", "#8d6e63"),
    ("pink", "#e91e63"),
    ("gray", "#95a5a6"),
    ("grey", "#95a5a6"),
    ("silver", "#bdc3c7"),
    ("gold", "#d4af37"),
];

lazy_static! {
    static ref HEX_RE: Regex = Regex::new(r"#[0-9a-fA-F]{6}\b|#[0-9a-fA-F]{3}\b").unwrap();
    static ref COLOR_NAME_RE: Regex = {
        let names: Vec<&str> = COLOR_TABLE.iter().map(|(n, _)| *n).collect();
        Regex::new(&format!(r"(?i)\b({})\b", names.join("|"))).unwrap()
    };
    static ref HEADER_RE: Regex = Regex::new(r"(?i)\b(header|heading|title)s?\b").unwrap();
    static ref BACKGROUND_RE: Regex = Regex::new(r"(?i)\bbackground\b").unwrap();
    static ref TEXT_RE: Regex = Regex::new(r"(?i)\b(text|body)\b").unwrap();
}

/// Resolve the color mentioned in the prompt to (display name, CSS value).
fn color_term(prompt: &str) -> Option<(String, String)> {
    if let Some(m) = HEX_RE.find(prompt) {
        let hex = m.as_str().to_lowercase();
        return Some((hex.clone(), hex));
    }
    COLOR_NAME_RE.find(prompt).map(|m| {
        let name = m.as_str().to_lowercase();
        let css = COLOR_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .unwrap_or("#000000");
        (name, css.to_string())
    })
}

pub fn recognize_header(prompt: &str) -> bool {
    color_term(prompt).is_some() && HEADER_RE.is_match(prompt)
}

pub fn recognize_background(prompt: &str) -> bool {
    color_term(prompt).is_some() && BACKGROUND_RE.is_match(prompt)
}

pub fn recognize_text(prompt: &str) -> bool {
    color_term(prompt).is_some() && TEXT_RE.is_match(prompt)
}

pub fn applied_header(html: &str) -> bool {
    html.contains(HEADER_MARKER)
}

pub fn applied_background(html: &str) -> bool {
    html.contains(BACKGROUND_MARKER)
}

pub fn applied_text(html: &str) -> bool {
    html.contains(TEXT_MARKER)
}

pub fn apply_header(html: &str, prompt: &str) -> Applied {
    let (name, css) = color_term(prompt).unwrap_or_else(default_color);
    let rule = format!("h1, h2, h3, h4, .header, #header, thead th {{ color: {css} !important; }}");
    Applied {
        html: insert_style_block(html, HEADER_MARKER, &rule),
        change: format!("Changed header color to {name}"),
    }
}

pub fn apply_background(html: &str, prompt: &str) -> Applied {
    let (name, css) = color_term(prompt).unwrap_or_else(default_color);
    let rule = format!("body {{ background-color: {css} !important; }}");
    Applied {
        html: insert_style_block(html, BACKGROUND_MARKER, &rule),
        change: format!("Changed background color to {name}"),
    }
}

pub fn apply_text(html: &str, prompt: &str) -> Applied {
    let (name, css) = color_term(prompt).unwrap_or_else(default_color);
    let rule = format!("body, p, li, td, th, span {{ color: {css}; }}");
    Applied {
        html: insert_style_block(html, TEXT_MARKER, &rule),
        change: format!("Changed text color to {name}"),
    }
}

fn default_color() -> (String, String) {
    ("black".to_string(), "#000000".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes_header_color_request() {
        assert!(recognize_header("make the header blue"));
        assert!(recognize_header("change the title to #ff0000"));
        assert!(!recognize_header("make the header bold"));
        assert!(!recognize_header("make the background blue"));
    }

    #[test]
    fn test_recognizes_background_and_text_requests() {
        assert!(recognize_background("give it a gray background"));
        assert!(recognize_text("make the text navy"));
        assert!(!recognize_text("increase the text size"));
    }

    #[test]
    fn test_color_term_prefers_hex_literal() {
        let (name, css) = color_term("paint the header #A1B2C3 blue").unwrap();
        assert_eq!(name, "#a1b2c3");
        assert_eq!(css, "#a1b2c3");
    }

    #[test]
    fn test_color_term_resolves_named_color() {
        let (name, css) = color_term("make it TEAL").unwrap();
        assert_eq!(name, "teal");
        assert_eq!(css, "#39cccc");
    }

    #[test]
    fn test_apply_header_injects_marked_style_block() {
        let out = apply_header("<html><head></head><body></body></html>", "make the header blue");
        assert!(out.html.contains(HEADER_MARKER));
        assert!(out.html.contains("#2980b9"));
        assert!(out.change.contains("blue"));
        assert!(applied_header(&out.html));
    }

    #[test]
    fn test_apply_background_uses_body_rule() {
        let out = apply_background("<body></body>", "white background please");
        assert!(out.html.contains("background-color: #ffffff"));
    }
}
