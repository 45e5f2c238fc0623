//! Diagonal text watermark overlay.

use lazy_static::lazy_static;
use regex::Regex;

use crate::anchors::{escape_html, insert_content_block};
use crate::catalog::Applied;

/// Marker class injected with the overlay; its presence means the effect
/// is already applied.
pub const MARKER: &str = "glyph-watermark";

const DEFAULT_LABEL: &str = "DRAFT";

lazy_static! {
    static ref RECOGNIZE_RE: Regex = Regex::new(r"(?i)\bwater\s?mark\b").unwrap();
    static ref QUOTED_RE: Regex = Regex::new(r#""([^"]+)"|'([^']+)'"#).unwrap();
    static ref LABEL_RE: Regex =
        Regex::new(r"(?i)\b(draft|paid|confidential|copy|urgent|approved|void|sample)\b").unwrap();
}

pub fn recognize(prompt: &str) -> bool {
    RECOGNIZE_RE.is_match(prompt)
}

pub fn applied(html: &str) -> bool {
    html.contains(MARKER)
}

/// Quoted text wins over known label words; everything else gets DRAFT.
fn label(prompt: &str) -> String {
    if let Some(caps) = QUOTED_RE.captures(prompt) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            return m.as_str().to_string();
        }
    }
    LABEL_RE
        .find(prompt)
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_else(|| DEFAULT_LABEL.to_string())
}

pub fn apply(html: &str, prompt: &str) -> Applied {
    let label = label(prompt);
    let fragment = format!(
        "<div class=\"{MARKER}\" style=\"position: fixed; top: 45%; left: 10%; \
         transform: rotate(-30deg); font-size: 72px; font-weight: bold; \
         color: rgba(180, 180, 180, 0.45); letter-spacing: 8px; \
         pointer-events: none; z-index: 9999;\">{}</div>\n",
        escape_html(&label)
    );
    Applied {
        html: insert_content_block(html, &fragment),
        change: format!("Added \"{label}\" watermark"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes_watermark_requests() {
        assert!(recognize("Add a watermark"));
        assert!(recognize("put a water mark on this"));
        assert!(!recognize("make the header blue"));
    }

    #[test]
    fn test_label_from_known_word() {
        assert_eq!(label("add a paid watermark"), "PAID");
        assert_eq!(label("CONFIDENTIAL watermark please"), "CONFIDENTIAL");
    }

    #[test]
    fn test_label_from_quoted_text() {
        assert_eq!(label(r#"watermark saying "Internal Use""#), "Internal Use");
    }

    #[test]
    fn test_label_defaults_to_draft() {
        assert_eq!(label("add a watermark"), "DRAFT");
    }

    #[test]
    fn test_apply_injects_marker_and_label() {
        let out = apply("<html><body><p>x</p></body></html>", "add a VOID watermark");
        assert!(out.html.contains(MARKER));
        assert!(out.html.contains(">VOID</div>"));
        assert!(out.change.contains("VOID"));
        assert!(applied(&out.html));
    }

    #[test]
    fn test_quoted_label_is_escaped() {
        let out = apply("<body></body>", r#"watermark saying "<b>X</b>""#);
        assert!(out.html.contains("&lt;b&gt;X&lt;/b&gt;"));
    }
}
