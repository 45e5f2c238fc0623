//! Single-pass orchestration of the guardrail stages.
//!
//! One call runs prompt classification, output integrity checking, and the
//! sanitize fallback in order, stopping at the first terminal state. The
//! prompt check always runs; the output stages only when a candidate is
//! supplied.

use chrono::Utc;
use shared_types::{GuardrailsResult, IntegrityConfig};
use tracing::{debug, warn};

use crate::integrity::check_modification;
use crate::rules::classify_prompt;
use crate::sanitizer::sanitize_html;

/// Run the full guardrail sequence for one edit request.
///
/// - Rejected prompt: terminal, the candidate is never inspected.
/// - Valid prompt, no candidate: pre-flight result, `output_valid` unset.
/// - Valid prompt, valid output: clean pass.
/// - Valid prompt, invalid output: violations plus a sanitized fallback
///   rendering of the candidate.
pub fn run_guardrails(
    original: &str,
    prompt: &str,
    candidate: Option<&str>,
    config: &IntegrityConfig,
) -> GuardrailsResult {
    let checked_at = Utc::now().timestamp() as u64;

    let prompt_verdict = classify_prompt(prompt);
    if !prompt_verdict.valid {
        warn!(
            category = ?prompt_verdict.category,
            "guardrails rejected instruction before model call"
        );
        return GuardrailsResult {
            prompt_valid: false,
            category: prompt_verdict.category,
            output_valid: None,
            violations: prompt_verdict.violations,
            sanitized_html: None,
            checked_at,
        };
    }

    let Some(candidate) = candidate else {
        debug!("guardrails pre-flight pass, no candidate supplied");
        return GuardrailsResult {
            prompt_valid: true,
            category: None,
            output_valid: None,
            violations: Vec::new(),
            sanitized_html: None,
            checked_at,
        };
    };

    let output_verdict = check_modification(original, candidate, config);
    if output_verdict.valid {
        debug!("guardrails accepted modified output");
        return GuardrailsResult {
            prompt_valid: true,
            category: None,
            output_valid: Some(true),
            violations: Vec::new(),
            sanitized_html: None,
            checked_at,
        };
    }

    warn!(
        violations = output_verdict.violations.len(),
        "guardrails rejected modified output, returning sanitized fallback"
    );
    GuardrailsResult {
        prompt_valid: true,
        category: None,
        output_valid: Some(false),
        violations: output_verdict.violations,
        sanitized_html: Some(sanitize_html(candidate)),
        checked_at,
    }
}
