//! Inline SVG QR code.

use lazy_static::lazy_static;
use qrcode::render::svg;
use qrcode::QrCode;
use regex::Regex;
use tracing::warn;

use crate::anchors::{escape_html, insert_content_block};
use crate::catalog::Applied;

pub const MARKER: &str = "glyph-qrcode";

/// Payload used when the prompt carries no URL.
const DEFAULT_PAYLOAD: &str = "https://glyph.you";

lazy_static! {
    static ref RECOGNIZE_RE: Regex = Regex::new(r"(?i)\bqr\b").unwrap();
    static ref URL_RE: Regex = Regex::new(r#"https?://[^\s"'<>]+"#).unwrap();
}

pub fn recognize(prompt: &str) -> bool {
    RECOGNIZE_RE.is_match(prompt)
}

pub fn applied(html: &str) -> bool {
    html.contains(MARKER)
}

fn payload(prompt: &str) -> String {
    URL_RE
        .find(prompt)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ')']).to_string())
        .unwrap_or_else(|| DEFAULT_PAYLOAD.to_string())
}

pub fn apply(html: &str, prompt: &str) -> Applied {
    let url = payload(prompt);
    let body = match QrCode::new(url.as_bytes()) {
        Ok(code) => code
            .render::<svg::Color>()
            .min_dimensions(120, 120)
            .quiet_zone(true)
            .build(),
        // Oversized or otherwise unencodable payload: degrade to a plain
        // link box so the document still carries the destination.
        Err(err) => {
            warn!(%url, error = %err, "QR encoding failed, inserting link box");
            format!(
                "<a href=\"{0}\" style=\"display: inline-block; padding: 8px; \
                 border: 1px solid #333;\">{0}</a>",
                escape_html(&url)
            )
        }
    };
    let fragment = format!("<div class=\"{MARKER}\" style=\"margin: 16px 0;\">{body}</div>\n");
    Applied {
        html: insert_content_block(html, &fragment),
        change: format!("Added QR code linking to {url}"),
    }
}
