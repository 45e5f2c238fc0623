//! Deterministic fast-path edits for a closed set of single-intent
//! requests, applied without a model call.
//!
//! A request is handled here only when exactly one rule recognizes it;
//! zero matches and compound requests both route back to the LLM path.
//! Every effect injects a marker the executor checks before reapplying,
//! so repeating a request is a successful no-op rather than a duplicate.

pub mod anchors;
pub mod catalog;
pub mod rules;

pub use catalog::{rules, Applied, TransformRule};

use shared_types::FastTransformResult;
use tracing::debug;

fn matching_rule(prompt: &str) -> Option<&'static TransformRule> {
    let mut matches = catalog::rules().iter().filter(|r| (r.recognize)(prompt));
    match (matches.next(), matches.next()) {
        (Some(rule), None) => Some(rule),
        _ => None,
    }
}

/// True iff exactly one rule recognizes the instruction.
pub fn can_fast_transform(prompt: &str) -> bool {
    matching_rule(prompt).is_some()
}

/// Apply the single matching rule, if any.
///
/// Non-match is a routing signal, not an error: the input comes back
/// byte-identical with `transformed == false`. A matched rule whose effect
/// marker is already present returns the input unchanged with an
/// "already present" change note.
pub fn fast_transform(html: &str, prompt: &str) -> FastTransformResult {
    let Some(rule) = matching_rule(prompt) else {
        debug!("no single fast-transform rule matched, routing to model path");
        return FastTransformResult::unchanged(html);
    };

    if (rule.already_applied)(html) {
        debug!(rule = rule.name, "effect already present, returning no-op");
        return FastTransformResult {
            transformed: true,
            html: html.to_string(),
            changes: vec![format!("{} already present", rule.name.replace('-', " "))],
        };
    }

    debug!(rule = rule.name, "applying fast transform");
    let applied = (rule.apply)(html, prompt);
    FastTransformResult {
        transformed: true,
        html: applied.html,
        changes: vec![applied.change],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html><head><title>Invoice</title></head><body>
  <h1>{{company.name}}</h1>
  <table>{{#lineItems}}<tr><td>{{item.price}}</td></tr>{{/lineItems}}</table>
  <strong>{{totals.grand}}</strong>
</body></html>"#;

    #[test]
    fn test_single_intent_prompts_are_eligible() {
        assert!(can_fast_transform("add a watermark"));
        assert!(can_fast_transform("Add a QR code for https://example.com/pay"));
        assert!(can_fast_transform("make the header blue"));
        assert!(can_fast_transform("add a signature block"));
    }

    #[test]
    fn test_unrecognized_prompt_is_not_eligible() {
        assert!(!can_fast_transform("translate the invoice to French"));
        assert!(!can_fast_transform(""));
    }

    #[test]
    fn test_compound_prompt_is_not_eligible() {
        assert!(!can_fast_transform("add a watermark and a QR code"));
        assert!(!can_fast_transform("make the header blue and add zebra stripes"));
    }

    #[test]
    fn test_non_match_returns_input_byte_identical() {
        let result = fast_transform(SAMPLE, "translate the invoice to French");
        assert!(!result.transformed);
        assert_eq!(result.html, SAMPLE);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_compound_returns_input_byte_identical() {
        let result = fast_transform(SAMPLE, "add a watermark and a QR code");
        assert!(!result.transformed);
        assert_eq!(result.html, SAMPLE);
    }

    #[test]
    fn test_qr_transform_embeds_svg_and_notes_url() {
        let result = fast_transform(SAMPLE, "Add a QR code for https://example.com/pay");
        assert!(result.transformed);
        assert!(result.html.contains("<svg"));
        assert!(result.changes[0].contains("https://example.com/pay"));
    }

    #[test]
    fn test_watermark_applied_twice_is_stable() {
        let first = fast_transform(SAMPLE, "add a DRAFT watermark");
        assert!(first.transformed);
        assert!(first.html.contains("glyph-watermark"));

        let second = fast_transform(&first.html, "add a DRAFT watermark");
        assert!(second.transformed);
        assert_eq!(second.html, first.html);
        assert!(second.changes[0].contains("already present"));
    }

    #[test]
    fn test_header_color_transform_inserts_style_block() {
        let result = fast_transform(SAMPLE, "make the header blue");
        assert!(result.transformed);
        assert!(result.html.contains("glyph-style-header-color"));
        assert!(result.html.contains("{{totals.grand}}"));
    }

    #[test]
    fn test_transform_preserves_placeholders() {
        let result = fast_transform(SAMPLE, "add a thank you note");
        assert!(result.transformed);
        for marker in ["{{company.name}}", "{{#lineItems}}", "{{/lineItems}}", "{{totals.grand}}"] {
            assert!(result.html.contains(marker));
        }
    }

    #[test]
    fn test_borders_add_and_remove_route_to_distinct_rules() {
        let added = fast_transform(SAMPLE, "add borders to the table");
        assert!(added.html.contains("glyph-style-borders"));

        let removed = fast_transform(SAMPLE, "remove the table borders");
        assert!(removed.html.contains("glyph-style-borders-off"));
    }

}
