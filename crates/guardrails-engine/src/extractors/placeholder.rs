//! Data-binding marker extraction.
//!
//! Three marker families, all purely lexical:
//! - field markers: `{{ path.to.field }}`
//! - repeated-section markers: `{{#name}}` ... `{{/name}}`, paired by name
//! - named regions: `data-region="id"` attribute values

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::PlaceholderSet;

use super::scanner::scan_tags;

/// Attribute carrying a named-region identifier.
pub const REGION_ATTR: &str = "data-region";

lazy_static! {
    static ref FIELD_RE: Regex =
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)\s*\}\}").unwrap();
    static ref SECTION_OPEN_RE: Regex =
        Regex::new(r"\{\{\s*#\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").unwrap();
    static ref SECTION_CLOSE_RE: Regex =
        Regex::new(r"\{\{\s*/\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").unwrap();
}

/// Extract every data-binding marker present in the document.
///
/// Pure function of the document text: identical input yields an identical
/// set, which is what makes the before/after diff in the integrity checker
/// meaningful.
pub fn extract_placeholders(html: &str) -> PlaceholderSet {
    let mut set = PlaceholderSet::default();

    for caps in FIELD_RE.captures_iter(html) {
        if let Some(name) = caps.get(1) {
            set.fields.insert(name.as_str().to_string());
        }
    }

    for caps in SECTION_OPEN_RE.captures_iter(html) {
        if let Some(name) = caps.get(1) {
            set.sections.entry(name.as_str().to_string()).or_default().open = true;
        }
    }

    for caps in SECTION_CLOSE_RE.captures_iter(html) {
        if let Some(name) = caps.get(1) {
            set.sections.entry(name.as_str().to_string()).or_default().close = true;
        }
    }

    for tag in scan_tags(html) {
        if let Some(region) = tag.attr(REGION_ATTR) {
            if !region.is_empty() {
                set.regions.insert(region.to_string());
            }
        }
    }

    set
}


// ============================================================================
// PROPERTY TESTS - Fuzz testing for marker extraction
// ============================================================================
