pub mod extractors;
pub mod integrity;
pub mod patterns;
pub mod pipeline;
pub mod rules;
pub mod sanitizer;

use shared_types::{
    GuardrailsResult, IntegrityConfig, PlaceholderSet, StructuralAdvisory, ValidationVerdict,
};

/// GuardrailsEngine entry point
pub struct GuardrailsEngine {
    config: IntegrityConfig,
}

impl GuardrailsEngine {
    pub fn new() -> Self {
        Self {
            config: IntegrityConfig::default(),
        }
    }

    pub fn with_config(config: IntegrityConfig) -> Self {
        Self { config }
    }

    /// Classify a free-text edit instruction before it reaches the model.
    pub fn validate_prompt(&self, prompt: &str) -> ValidationVerdict {
        rules::classify_prompt(prompt)
    }

    /// Advisory check for instructions that reshape repeated data.
    pub fn detect_structural_request(&self, prompt: &str) -> StructuralAdvisory {
        rules::detect_structural_request(prompt)
    }

    /// Collect the data-binding markers present in a document.
    pub fn extract_placeholders(&self, html: &str) -> PlaceholderSet {
        extractors::extract_placeholders(html)
    }

    /// Compare an edited document against its original.
    pub fn validate_modification(&self, original: &str, candidate: &str) -> ValidationVerdict {
        integrity::check_modification(original, candidate, &self.config)
    }

    /// Strip recognized executable content from a document.
    pub fn sanitize_html(&self, html: &str) -> String {
        sanitizer::sanitize_html(html)
    }

    /// Run the full guardrail sequence for one edit request.
    pub fn run_guardrails(
        &self,
        original: &str,
        prompt: &str,
        candidate: Option<&str>,
    ) -> GuardrailsResult {
        pipeline::run_guardrails(original, prompt, candidate, &self.config)
    }
}

impl Default for GuardrailsEngine {
    fn default() -> Self {
        Self::new()
    }
}
