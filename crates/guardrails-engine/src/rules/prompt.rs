use regex::Regex;
use shared_types::{PromptCategory, Severity, TextPosition, ValidationVerdict, Violation};

use crate::patterns::{
    snippet_around, DATA_TAMPERING_PATTERNS, DESTRUCTIVE_PATTERNS, EXECUTABLE_CONTENT_PATTERNS,
    INJECTION_PATTERNS, UNPROFESSIONAL_PATTERNS,
};

/// Classify a free-text instruction before it reaches the model.
///
/// The five rule groups are checked in fixed severity order; the first group
/// with any matching pattern short-circuits. Within a group the patterns are
/// interchangeable (any match triggers the group). Unmatched input, including
/// the empty string, is safe by default.
pub fn classify_prompt(prompt: &str) -> ValidationVerdict {
    let groups: [(&[(Regex, &'static str)], PromptCategory); 5] = [
        (&INJECTION_PATTERNS, PromptCategory::Injection),
        (&DATA_TAMPERING_PATTERNS, PromptCategory::DataTampering),
        (&DESTRUCTIVE_PATTERNS, PromptCategory::Destructive),
        (
            &EXECUTABLE_CONTENT_PATTERNS,
            PromptCategory::ExecutableContent,
        ),
        (
            &UNPROFESSIONAL_PATTERNS,
            PromptCategory::UnprofessionalContent,
        ),
    ];

    for (table, category) in groups {
        if let Some(violation) = match_group(prompt, table, category) {
            return ValidationVerdict::reject(category, violation);
        }
    }

    ValidationVerdict::pass()
}

fn match_group(
    prompt: &str,
    table: &[(Regex, &'static str)],
    category: PromptCategory,
) -> Option<Violation> {
    for (re, description) in table {
        if let Some(m) = re.find(prompt) {
            return Some(Violation {
                rule: format!("prompt.{}", rule_slug(category)),
                severity: Severity::Critical,
                message: format!("Instruction rejected: {}", description),
                text_snippet: Some(snippet_around(prompt, m.start(), m.end())),
                text_position: Some(TextPosition {
                    start_offset: m.start(),
                    end_offset: m.end(),
                }),
            });
        }
    }
    None
}

fn rule_slug(category: PromptCategory) -> &'static str {
    match category {
        PromptCategory::Injection => "injection",
        PromptCategory::DataTampering => "data-tampering",
        PromptCategory::Destructive => "destructive",
        PromptCategory::ExecutableContent => "executable-content",
        PromptCategory::UnprofessionalContent => "unprofessional-content",
    }
}


// ============================================================================
// PROPERTY TESTS - Fuzz testing for prompt classification
// ============================================================================
