use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Category assigned to a rejected instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    Injection,
    DataTampering,
    Destructive,
    ExecutableContent,
    UnprofessionalContent,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextPosition {
    pub start_offset: usize, // Character offset in the document text
    pub end_offset: usize,   // End character offset
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    pub rule: String, // e.g., "placeholder.field-missing"
    pub severity: Severity,
    pub message: String,
    pub text_snippet: Option<String>,
    pub text_position: Option<TextPosition>, // Position for highlighting
}

/// Outcome of a prompt-level or output-level validation pass.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub category: Option<PromptCategory>,
    pub violations: Vec<Violation>,
}

impl ValidationVerdict {
    /// A passing verdict. `valid == true` always carries an empty violation list.
    pub fn pass() -> Self {
        Self {
            valid: true,
            category: None,
            violations: Vec::new(),
        }
    }

    /// A prompt-level rejection with its category and the matched rule.
    pub fn reject(category: PromptCategory, violation: Violation) -> Self {
        Self {
            valid: false,
            category: Some(category),
            violations: vec![violation],
        }
    }

    /// An output-level verdict. Category is never set for output checks.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            category: None,
            violations,
        }
    }
}

/// Advisory result for instructions that imply reordering or regrouping data.
/// Never blocks; the caller decides whether to surface the warning.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StructuralAdvisory {
    pub is_structural: bool,
    pub warning: Option<String>,
}

/// Open/close presence for one repeated-section marker name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SectionMarkers {
    pub open: bool,
    pub close: bool,
}

/// The data-binding markers found in one document.
///
/// BTree containers keep ordering and equality deterministic, so extracting
/// twice from the same document yields an identical set.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaceholderSet {
    pub fields: BTreeSet<String>,
    pub sections: BTreeMap<String, SectionMarkers>,
    pub regions: BTreeSet<String>,
}

impl PlaceholderSet {
    /// Section names with both an open and a close marker present.
    pub fn complete_sections(&self) -> BTreeSet<String> {
        self.sections
            .iter()
            .filter(|(_, m)| m.open && m.close)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.sections.is_empty() && self.regions.is_empty()
    }
}

/// Combined verdict for one modification request.
///
/// `output_valid` is present only when the prompt passed and a candidate
/// document was supplied. `sanitized_html` is present only when the output
/// check failed, giving the caller a safe-but-imperfect fallback.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GuardrailsResult {
    pub prompt_valid: bool,
    pub category: Option<PromptCategory>,
    pub output_valid: Option<bool>,
    pub violations: Vec<Violation>,
    pub sanitized_html: Option<String>,
    pub checked_at: u64,
}

/// Result of a deterministic no-LLM edit.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FastTransformResult {
    pub transformed: bool,
    pub html: String,
    pub changes: Vec<String>,
}

impl FastTransformResult {
    /// The declined result: the input document passes through byte-identical.
    pub fn unchanged(html: &str) -> Self {
        Self {
            transformed: false,
            html: html.to_string(),
            changes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_verdict_has_no_violations() {
        let verdict = ValidationVerdict::pass();
        assert!(verdict.valid);
        assert!(verdict.category.is_none());
        assert!(verdict.violations.is_empty());
    }

    #[test]
    fn test_from_violations_sets_valid_flag() {
        let empty = ValidationVerdict::from_violations(Vec::new());
        assert!(empty.valid);

        let failing = ValidationVerdict::from_violations(vec![Violation {
            rule: "security.script-tag".to_string(),
            severity: Severity::Critical,
            message: "Script tag detected".to_string(),
            text_snippet: None,
            text_position: None,
        }]);
        assert!(!failing.valid);
        assert!(failing.category.is_none());
    }

    #[test]
    fn test_complete_sections_requires_both_markers() {
        let mut set = PlaceholderSet::default();
        set.sections.insert(
            "lineItems".to_string(),
            SectionMarkers {
                open: true,
                close: true,
            },
        );
        set.sections.insert(
            "orphan".to_string(),
            SectionMarkers {
                open: true,
                close: false,
            },
        );

        let complete = set.complete_sections();
        assert!(complete.contains("lineItems"));
        assert!(!complete.contains("orphan"));
    }

    #[test]
    fn test_prompt_category_serializes_snake_case() {
        let json = serde_json::to_string(&PromptCategory::DataTampering).unwrap();
        assert_eq!(json, "\"data_tampering\"");
    }
}
