use shared_types::StructuralAdvisory;

use crate::patterns::STRUCTURAL_PATTERNS;

/// Warning surfaced to the user when an instruction implies reshaping
/// repeated data rather than pure styling.
const STRUCTURAL_WARNING: &str = "This type of edit can change data relationships \
     (grouping, ordering, or aggregation). Review the result carefully before sending.";

/// Flag instructions that imply reordering, grouping, sorting, or
/// aggregating repeated data. Advisory only: the caller decides whether to
/// surface the warning, and the request is never blocked on this basis.
pub fn detect_structural_request(prompt: &str) -> StructuralAdvisory {
    let is_structural = STRUCTURAL_PATTERNS.iter().any(|(re, _)| re.is_match(prompt));

    StructuralAdvisory {
        is_structural,
        warning: is_structural.then(|| STRUCTURAL_WARNING.to_string()),
    }
}
