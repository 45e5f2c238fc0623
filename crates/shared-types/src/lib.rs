pub mod config;
pub mod types;

pub use config::{ConfigError, IntegrityConfig};
pub use types::{
    FastTransformResult, GuardrailsResult, PlaceholderSet, PromptCategory, SectionMarkers,
    Severity, StructuralAdvisory, TextPosition, ValidationVerdict, Violation,
};
