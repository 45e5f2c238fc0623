//! Pattern lexicons for prompt classification and output scanning.
//!
//! Every lexicon is a named, ordered table of `(Regex, description)` tuples
//! compiled once at startup. Keeping the rulesets here, away from control
//! flow, lets them be audited and extended without touching the classifiers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Attempts to override system behavior or escape the editing role.
    pub static ref INJECTION_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)\b(ignore|disregard|forget)\s+(all\s+|any\s+)?(previous|prior|above|your|earlier)\s+(instructions?|prompts?|rules?|directions?)").unwrap(),
            "attempt to discard prior instructions",
        ),
        (
            Regex::new(r"(?im)^\s*(system|assistant)\s*:").unwrap(),
            "role prefix impersonating a system message",
        ),
        (
            Regex::new(r"(?i)\bnew\s+instructions?\s*:").unwrap(),
            "attempt to supply replacement instructions",
        ),
        (
            Regex::new(r"(?i)\bpretend\s+(you\s+are|to\s+be)\b").unwrap(),
            "attempt to reassign the assistant's role",
        ),
        (
            Regex::new(r"(?i)\byou\s+are\s+now\b").unwrap(),
            "attempt to reassign the assistant's role",
        ),
        (
            Regex::new(r"(?i)\bjailbreak").unwrap(),
            "jailbreak request",
        ),
        (
            Regex::new(r"(?i)\bdeveloper\s+mode\b").unwrap(),
            "developer-mode request",
        ),
        (
            Regex::new(r"(?i)\boverride\s+(your|the)\s+(instructions?|rules?|system|guardrails?)\b").unwrap(),
            "attempt to override system behavior",
        ),
    ];

    /// Direct manipulation of monetary or quantity values, or of the
    /// data-binding markers themselves.
    pub static ref DATA_TAMPERING_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)\b(change|set|update|make|alter|edit)\s+(the\s+)?(unit\s+)?(price|prices|total|totals|amount|amounts|subtotal|balance|quantity|qty|cost|costs)\b[^.?!]*\bto\b").unwrap(),
            "direct edit of a monetary or quantity value",
        ),
        (
            Regex::new(r"(?i)\b(increase|decrease|double|halve|inflate|bump)\s+(the\s+)?(price|prices|total|totals|amount|subtotal|balance|quantity|qty)\b").unwrap(),
            "direct adjustment of a monetary or quantity value",
        ),
        (
            Regex::new(r"(?i)\bchange\s*\{\{[^}]*\}\}\s*to\b").unwrap(),
            "direct edit of a data-binding marker",
        ),
        (
            Regex::new(r"(?i)\b(remove|delete|strip)\s+(the\s+)?\{\{[^}]*\}\}").unwrap(),
            "removal of a data-binding marker",
        ),
    ];

    /// Wholesale document erasure.
    pub static ref DESTRUCTIVE_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)\b(delete|remove|erase)\s+(all|everything|the\s+(entire|whole))\b").unwrap(),
            "wholesale deletion of document content",
        ),
        (
            Regex::new(r"(?i)\bclear\s+(the\s+)?(document|page|invoice|template|content)\b").unwrap(),
            "request to clear the document",
        ),
        (
            Regex::new(r"(?i)\bwipe\b").unwrap(),
            "request to wipe the document",
        ),
        (
            Regex::new(r"(?i)\bmake\s+(it|the\s+(document|page|invoice))\s+(blank|empty)\b").unwrap(),
            "request to blank the document",
        ),
        (
            Regex::new(r"(?i)\bdestroy\b").unwrap(),
            "request to destroy content",
        ),
    ];

    /// Requests for script tags, event handlers, iframes, or raw JavaScript.
    pub static ref EXECUTABLE_CONTENT_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)<\s*script").unwrap(),
            "literal script tag in the instruction",
        ),
        (
            Regex::new(r"(?i)<\s*iframe").unwrap(),
            "literal iframe tag in the instruction",
        ),
        (
            Regex::new(r"(?i)\b(add|insert|include|embed|put|inject|run|execute)\b[^.?!]*\b(script|scripts|javascript|js\s+code)\b").unwrap(),
            "request to add executable script content",
        ),
        (
            Regex::new(r"(?i)\b(add|insert|include|embed)\b[^.?!]*\biframe\b").unwrap(),
            "request to embed an iframe",
        ),
        (
            Regex::new(r"(?i)\bon(click|load|error|mouseover|mouseout|focus|blur|change|submit)\s*=").unwrap(),
            "inline event-handler attribute in the instruction",
        ),
        (
            Regex::new(r"(?i)javascript\s*:").unwrap(),
            "javascript: URL scheme in the instruction",
        ),
        (
            Regex::new(r"(?i)\bevent\s+handlers?\b").unwrap(),
            "request for event-handler wiring",
        ),
    ];

    /// Whimsical or decorative effects that are off-brand for business
    /// documents.
    pub static ref UNPROFESSIONAL_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)\bconfetti\b").unwrap(),
            "confetti effect",
        ),
        (
            Regex::new(r"(?i)\bcomic\s*sans\b").unwrap(),
            "Comic Sans font",
        ),
        (
            Regex::new(r"(?i)\brainbow\b").unwrap(),
            "rainbow coloring",
        ),
        (
            Regex::new(r"(?i)\bsparkl\w*\b").unwrap(),
            "sparkle effect",
        ),
        (
            Regex::new(r"(?i)\bglitter\w*\b").unwrap(),
            "glitter effect",
        ),
        (
            Regex::new(r"(?i)\bemojis?\b").unwrap(),
            "emoji decoration",
        ),
        (
            Regex::new(r"(?i)\bballoons?\b").unwrap(),
            "balloon decoration",
        ),
        (
            Regex::new(r"(?i)\bparty\s+(theme|style|mode|vibe)\b").unwrap(),
            "party theming",
        ),
    ];

    /// Reordering, grouping, or aggregation of repeated data. Advisory only.
    pub static ref STRUCTURAL_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)\bgroup\b[^.?!]*\bby\b").unwrap(),
            "grouping of repeated data",
        ),
        (
            Regex::new(r"(?i)\bsort\b[^.?!]*\bby\b").unwrap(),
            "sorting of repeated data",
        ),
        (
            Regex::new(r"(?i)\b(reorder|rearrange|reorganize)\b").unwrap(),
            "reordering of document data",
        ),
        (
            Regex::new(r"(?i)\bcombine\b").unwrap(),
            "combining of data rows",
        ),
        (
            Regex::new(r"(?i)\bmerge\s+(the\s+)?(rows?|cells?|columns?|items?|lines?|tables?)\b").unwrap(),
            "merging of data rows",
        ),
        (
            Regex::new(r"(?i)\baggregate\b").unwrap(),
            "aggregation of repeated data",
        ),
        (
            Regex::new(r"(?i)\bsubtotals?\s+by\b").unwrap(),
            "regrouped subtotals",
        ),
    ];

    /// Unprofessional content actually present in rendered output. The
    /// prompt lexicon above covers requests; this one catches an LLM adding
    /// such content unprompted.
    pub static ref UNPROFESSIONAL_OUTPUT_MARKERS: Vec<(Regex, &'static str)> = vec![
        (
            Regex::new(r"(?i)comic\s*sans").unwrap(),
            "Comic Sans font stack",
        ),
        (
            Regex::new(r"(?i)\bconfetti\b").unwrap(),
            "confetti content",
        ),
        (
            Regex::new(r"(?i)\brainbow\b").unwrap(),
            "rainbow styling",
        ),
        (
            Regex::new(r"(?i)\bsparkl\w*\b").unwrap(),
            "sparkle styling",
        ),
        (
            Regex::new(r"[\u{1F389}\u{1F38A}\u{2728}\u{1F388}\u{1F973}\u{1F4A5}]").unwrap(),
            "celebratory emoji",
        ),
    ];
}

/// Field-name keywords that mark a placeholder as grand-total-class.
/// Losing one of these is always a critical violation, even when the
/// per-template config lists nothing.
pub const CRITICAL_FIELD_KEYWORDS: &[&str] = &["total", "grand", "amount", "balance", "due"];

/// True when the field name carries a grand-total-class keyword.
pub fn is_critical_field_name(name: &str) -> bool {
    let name_lower = name.to_lowercase();
    CRITICAL_FIELD_KEYWORDS
        .iter()
        .any(|kw| name_lower.contains(kw))
}

/// Extract a snippet around a pattern match (up to ~100 characters of
/// surrounding context), for violation reporting.
pub fn snippet_around(text: &str, start: usize, end: usize) -> String {
    let from = floor_char_boundary(text, start.saturating_sub(50));
    let to = ceil_char_boundary(text, (end + 50).min(text.len()));
    format!("...{}...", text[from..to].trim())
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
