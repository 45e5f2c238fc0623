//! Appended content blocks: signature lines and a thank-you note.

use lazy_static::lazy_static;
use regex::Regex;

use crate::anchors::insert_content_block;
use crate::catalog::Applied;

pub const SIGNATURE_MARKER: &str = "glyph-signature";
pub const THANKYOU_MARKER: &str = "glyph-thankyou";

lazy_static! {
    static ref SIGNATURE_RE: Regex = Regex::new(r"(?i)\bsignature\b").unwrap();
    static ref THANKYOU_RE: Regex = Regex::new(r"(?i)\bthank\s*-?\s*you\b|\bthanks\b").unwrap();
}

pub fn recognize_signature(prompt: &str) -> bool {
    SIGNATURE_RE.is_match(prompt)
}

pub fn recognize_thankyou(prompt: &str) -> bool {
    THANKYOU_RE.is_match(prompt)
}

pub fn applied_signature(html: &str) -> bool {
    html.contains(SIGNATURE_MARKER)
}

pub fn applied_thankyou(html: &str) -> bool {
    html.contains(THANKYOU_MARKER)
}

pub fn apply_signature(html: &str, _prompt: &str) -> Applied {
    let fragment = format!(
        "<div class=\"{SIGNATURE_MARKER}\" style=\"margin-top: 48px; page-break-inside: avoid;\">\n\
         <div style=\"display: inline-block; margin-right: 64px;\">\n\
         <div style=\"border-top: 1px solid #333; width: 240px; padding-top: 4px;\">Signature</div>\n\
         </div>\n\
         <div style=\"display: inline-block;\">\n\
         <div style=\"border-top: 1px solid #333; width: 160px; padding-top: 4px;\">Date</div>\n\
         </div>\n\
         </div>\n"
    );
    Applied {
        html: insert_content_block(html, &fragment),
        change: "Added signature block".to_string(),
    }
}

pub fn apply_thankyou(html: &str, _prompt: &str) -> Applied {
    let fragment = format!(
        "<div class=\"{THANKYOU_MARKER}\" style=\"margin-top: 32px; font-style: italic; \
         text-align: center;\">Thank you for your business.</div>\n"
    );
    Applied {
        html: insert_content_block(html, &fragment),
        change: "Added thank-you note".to_string(),
    }
}
