//! Before/after comparison of a document around an LLM edit.
//!
//! The checker never inspects the instruction that produced the edit; it
//! compares the candidate output against the original on purely structural
//! grounds. Six check families run unconditionally and their violations
//! accumulate, so one report lists everything wrong with the output.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{IntegrityConfig, Severity, ValidationVerdict, Violation};

use crate::extractors::{extract_placeholders, scan_tags};
use crate::patterns::{is_critical_field_name, snippet_around, UNPROFESSIONAL_OUTPUT_MARKERS};

lazy_static! {
    static ref SCRIPT_TAG_RE: Regex = Regex::new(r"(?i)<\s*script\b").unwrap();
    static ref IFRAME_TAG_RE: Regex = Regex::new(r"(?i)<\s*iframe\b").unwrap();
    static ref JS_URL_RE: Regex = Regex::new(r"(?i)javascript\s*:").unwrap();
    static ref EVENT_ATTR_RE: Regex = Regex::new(r"(?i)^on[a-z]+$").unwrap();
    static ref EVENT_TEXT_RE: Regex = Regex::new(
        r"(?i)\bon(click|load|error|mouseover|mouseout|focus|blur|change|submit|input|keydown|keyup)\s*="
    )
    .unwrap();
    static ref DOCTYPE_RE: Regex = Regex::new(r"(?i)<!doctype\s+html").unwrap();
    static ref HTML_TAG_RE: Regex = Regex::new(r"(?i)<\s*html\b").unwrap();
    static ref BODY_TAG_RE: Regex = Regex::new(r"(?i)<\s*body\b").unwrap();
}

/// Compare `candidate` against `original` and report every integrity
/// violation found. Any violation invalidates the verdict; severity is
/// reporting metadata, not a pass/fail threshold.
pub fn check_modification(
    original: &str,
    candidate: &str,
    config: &IntegrityConfig,
) -> ValidationVerdict {
    let mut violations = Vec::new();

    check_placeholder_survival(original, candidate, config, &mut violations);
    check_unauthorized_sections(original, candidate, &mut violations);
    check_executable_content(original, candidate, &mut violations);
    check_unprofessional_markers(candidate, &mut violations);
    check_content_loss(original, candidate, config, &mut violations);
    check_document_shell(original, candidate, &mut violations);

    ValidationVerdict::from_violations(violations)
}

/// Severity of losing a named binding: critical when the name suggests a
/// monetary or otherwise load-bearing field, warning otherwise.
fn field_loss_severity(name: &str, config: &IntegrityConfig) -> Severity {
    if is_critical_field_name(name) || config.critical_fields.iter().any(|f| f == name) {
        Severity::Critical
    } else {
        Severity::Warning
    }
}

fn check_placeholder_survival(
    original: &str,
    candidate: &str,
    config: &IntegrityConfig,
    violations: &mut Vec<Violation>,
) {
    let before = extract_placeholders(original);
    let after = extract_placeholders(candidate);

    for field in before.fields.difference(&after.fields) {
        violations.push(Violation {
            rule: "placeholder.field-missing".to_string(),
            severity: field_loss_severity(field, config),
            message: format!("Data field {{{{{field}}}}} was removed by the edit"),
            text_snippet: None,
            text_position: None,
        });
    }

    for region in before.regions.difference(&after.regions) {
        violations.push(Violation {
            rule: "placeholder.region-missing".to_string(),
            severity: Severity::Warning,
            message: format!("Named region \"{region}\" was removed by the edit"),
            text_snippet: None,
            text_position: None,
        });
    }

    for (name, markers) in &before.sections {
        let Some(after_markers) = after.sections.get(name) else {
            if markers.open || markers.close {
                violations.push(Violation {
                    rule: "placeholder.section-missing".to_string(),
                    severity: Severity::Critical,
                    message: format!("Repeated section \"{name}\" was removed by the edit"),
                    text_snippet: None,
                    text_position: None,
                });
            }
            continue;
        };
        // A pair that was complete before and is one-sided after means the
        // repeat region can no longer render.
        if markers.open && markers.close && !(after_markers.open && after_markers.close) {
            violations.push(Violation {
                rule: "placeholder.section-broken".to_string(),
                severity: Severity::Critical,
                message: format!(
                    "Repeated section \"{name}\" lost one of its markers; the pair no longer closes"
                ),
                text_snippet: None,
                text_position: None,
            });
        }
    }
}

fn check_unauthorized_sections(original: &str, candidate: &str, violations: &mut Vec<Violation>) {
    let before = extract_placeholders(original);
    let after = extract_placeholders(candidate);

    for name in after.sections.keys() {
        if !before.sections.contains_key(name) {
            violations.push(Violation {
                rule: "section.unauthorized-new".to_string(),
                severity: Severity::Critical,
                message: format!(
                    "Edit introduced a new repeated section \"{name}\" that the template never declared"
                ),
                text_snippet: None,
                text_position: None,
            });
        }
    }
}

/// One violation per distinct executable-content category, reported only
/// when the candidate introduces something the original did not carry.
fn check_executable_content(original: &str, candidate: &str, violations: &mut Vec<Violation>) {
    let mut push = |rule: &str, message: &str, m: Option<regex::Match<'_>>| {
        violations.push(Violation {
            rule: rule.to_string(),
            severity: Severity::Critical,
            message: message.to_string(),
            text_snippet: m.map(|m| snippet_around(candidate, m.start(), m.end())),
            text_position: m.map(|m| shared_types::TextPosition {
                start_offset: m.start(),
                end_offset: m.end(),
            }),
        });
    };

    if !SCRIPT_TAG_RE.is_match(original) {
        if let Some(m) = SCRIPT_TAG_RE.find(candidate) {
            push("security.script-tag", "Script tag detected in output", Some(m));
        }
    }

    if !IFRAME_TAG_RE.is_match(original) {
        if let Some(m) = IFRAME_TAG_RE.find(candidate) {
            push("security.iframe", "Iframe detected in output", Some(m));
        }
    }

    if !has_event_handler(original) && has_event_handler(candidate) {
        push(
            "security.event-handler",
            "Event handler attribute injected into output",
            None,
        );
    }

    if !JS_URL_RE.is_match(original) {
        if let Some(m) = JS_URL_RE.find(candidate) {
            push("security.javascript-url", "JavaScript URL detected in output", Some(m));
        }
    }
}

/// Scanner first, with a plain-text regex backstop for markup so broken
/// the scanner cannot tokenize it.
fn has_event_handler(html: &str) -> bool {
    scan_tags(html)
        .iter()
        .any(|tag| tag.attrs.iter().any(|a| EVENT_ATTR_RE.is_match(&a.name)))
        || EVENT_TEXT_RE.is_match(html)
}

fn check_unprofessional_markers(candidate: &str, violations: &mut Vec<Violation>) {
    for (re, description) in UNPROFESSIONAL_OUTPUT_MARKERS.iter() {
        if let Some(m) = re.find(candidate) {
            violations.push(Violation {
                rule: "content.unprofessional".to_string(),
                severity: Severity::Warning,
                message: format!("Output contains unprofessional content: {description}"),
                text_snippet: Some(snippet_around(candidate, m.start(), m.end())),
                text_position: Some(shared_types::TextPosition {
                    start_offset: m.start(),
                    end_offset: m.end(),
                }),
            });
        }
    }
}

/// Shrinkage heuristic: a candidate much shorter than a non-trivial original
/// usually means the model truncated or dropped content wholesale.
fn check_content_loss(
    original: &str,
    candidate: &str,
    config: &IntegrityConfig,
    violations: &mut Vec<Violation>,
) {
    if original.len() <= config.min_length_floor {
        return;
    }
    let threshold = (original.len() as f64 * config.content_loss_ratio) as usize;
    if candidate.len() < threshold {
        violations.push(Violation {
            rule: "content.loss-ratio".to_string(),
            severity: Severity::Warning,
            message: format!(
                "Output shrank from {} to {} bytes; substantial content may have been lost",
                original.len(),
                candidate.len()
            ),
            text_snippet: None,
            text_position: None,
        });
    }
}

/// The shell check only fires for markers the original actually carried, so
/// fragment templates are never penalized for being fragments.
fn check_document_shell(original: &str, candidate: &str, violations: &mut Vec<Violation>) {
    let markers: [(&Regex, &str); 3] = [
        (&DOCTYPE_RE, "doctype declaration"),
        (&HTML_TAG_RE, "<html> element"),
        (&BODY_TAG_RE, "<body> element"),
    ];

    for (re, what) in markers {
        if re.is_match(original) && !re.is_match(candidate) {
            violations.push(Violation {
                rule: "structure.document-shell".to_string(),
                severity: Severity::Critical,
                message: format!("Output lost the document {what} the original carried"),
                text_snippet: None,
                text_position: None,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: &str = r#"<!DOCTYPE html>
<html><body>
  <div data-region="header"><h1>{{company.name}}</h1></div>
  <table>
    {{#lineItems}}
    <tr><td>{{item.description}}</td><td>{{item.price}}</td></tr>
    {{/lineItems}}
  </table>
  <div data-region="totals"><strong>{{totals.grand}}</strong></div>
  <p>Payment due within 30 days of the invoice date. Thank you for your business.</p>
</body></html>"#;

    fn config() -> IntegrityConfig {
        IntegrityConfig::default()
    }

    fn rules(verdict: &ValidationVerdict) -> Vec<&str> {
        verdict.violations.iter().map(|v| v.rule.as_str()).collect()
    }

    #[test]
    fn test_identical_output_is_valid() {
        let verdict = check_modification(ORIGINAL, ORIGINAL, &config());
        assert!(verdict.valid);
        assert!(verdict.violations.is_empty());
    }

    #[test]
    fn test_missing_critical_field_is_critical() {
        let candidate = ORIGINAL.replace("{{totals.grand}}", "");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        let violation = verdict
            .violations
            .iter()
            .find(|v| v.rule == "placeholder.field-missing")
            .expect("field loss reported");
        assert_eq!(violation.severity, Severity::Critical);
        assert!(violation.message.contains("totals.grand"));
    }

    #[test]
    fn test_missing_ordinary_field_invalidates_at_warning_severity() {
        let candidate = ORIGINAL.replace("{{item.description}}", "");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        let violation = verdict
            .violations
            .iter()
            .find(|v| v.rule == "placeholder.field-missing")
            .expect("field loss reported");
        assert_eq!(violation.severity, Severity::Warning);
    }

    #[test]
    fn test_configured_critical_field_escalates() {
        let mut cfg = config();
        cfg.critical_fields.push("item.description".to_string());
        let candidate = ORIGINAL.replace("{{item.description}}", "");
        let verdict = check_modification(ORIGINAL, &candidate, &cfg);
        assert!(!verdict.valid);
    }

    #[test]
    fn test_broken_section_pair_is_critical() {
        let candidate = ORIGINAL.replace("{{/lineItems}}", "");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"placeholder.section-broken"));
    }

    #[test]
    fn test_section_removed_entirely_is_critical() {
        let candidate = ORIGINAL
            .replace("{{#lineItems}}", "")
            .replace("{{/lineItems}}", "");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"placeholder.section-missing"));
    }

    #[test]
    fn test_new_section_is_unauthorized() {
        let candidate = ORIGINAL.replace("</table>", "</table>{{#extras}}{{/extras}}");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"section.unauthorized-new"));
    }

    #[test]
    fn test_removed_region_invalidates() {
        let candidate = ORIGINAL.replace("data-region=\"header\"", "");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"placeholder.region-missing"));
    }

    #[test]
    fn test_injected_script_tag_is_critical() {
        let candidate = ORIGINAL.replace("</body>", "<script>alert(1)</script></body>");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        let violation = verdict
            .violations
            .iter()
            .find(|v| v.rule == "security.script-tag")
            .expect("script reported");
        assert!(violation.text_position.is_some());
    }

    #[test]
    fn test_injected_event_handler_is_critical() {
        let candidate = ORIGINAL.replace("<h1>", "<h1 onclick=\"steal()\">");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"security.event-handler"));
    }

    #[test]
    fn test_injected_javascript_url_is_critical() {
        let candidate = ORIGINAL.replace("</body>", "<a href=\"javascript:void(0)\">x</a></body>");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"security.javascript-url"));
    }

    #[test]
    fn test_preexisting_script_is_not_reported() {
        let original = format!("{ORIGINAL}<script src=\"chart.js\"></script>");
        let verdict = check_modification(&original, &original, &config());
        assert!(verdict.valid);
    }

    #[test]
    fn test_unprofessional_marker_invalidates() {
        let candidate = ORIGINAL.replace("</body>", "<div class=\"confetti\"></div></body>");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"content.unprofessional"));
    }

    #[test]
    fn test_severe_shrinkage_is_flagged() {
        let verdict = check_modification(ORIGINAL, "<html><body></body></html>", &config());
        assert!(rules(&verdict).contains(&"content.loss-ratio"));
    }

    #[test]
    fn test_short_original_skips_shrinkage_check() {
        let verdict = check_modification("<p>{{a}}</p>", "<p>{{a}}</p>", &config());
        assert!(verdict.valid);
        assert!(verdict.violations.is_empty());
    }

    #[test]
    fn test_lost_document_shell_is_critical() {
        let candidate = ORIGINAL
            .replace("<!DOCTYPE html>\n", "")
            .replace("<html>", "")
            .replace("</html>", "");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        assert!(rules(&verdict).contains(&"structure.document-shell"));
    }

    #[test]
    fn test_fragment_original_never_needs_shell() {
        let original = "<div>{{name}}</div>";
        let verdict = check_modification(original, "<div>{{name}}</div>", &config());
        assert!(verdict.valid);
    }

    #[test]
    fn test_multiple_failures_all_reported() {
        let candidate = ORIGINAL
            .replace("{{totals.grand}}", "")
            .replace("</body>", "<script>x()</script></body>");
        let verdict = check_modification(ORIGINAL, &candidate, &config());
        assert!(!verdict.valid);
        let rules = rules(&verdict);
        assert!(rules.contains(&"placeholder.field-missing"));
        assert!(rules.contains(&"security.script-tag"));
    }
}

// ============================================================================
// PROPERTY TESTS - Fuzz testing for the integrity diff
// ============================================================================
