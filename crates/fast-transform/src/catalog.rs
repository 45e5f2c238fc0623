//! Static transform rule table.
//!
//! Rules are process-wide configuration: built once, ordered, never
//! mutated. Each rule bundles a prompt recognizer, a probe for the effect
//! marker it injects, and the pure apply function.

use lazy_static::lazy_static;

use crate::rules::{blocks, color, layout, qrcode, typography, watermark};

/// Result of applying one rule: the new document plus a human-readable
/// change note for the user-facing change list.
pub struct Applied {
    pub html: String,
    pub change: String,
}

pub struct TransformRule {
    pub name: &'static str,
    pub recognize: fn(&str) -> bool,
    pub already_applied: fn(&str) -> bool,
    pub apply: fn(&str, &str) -> Applied,
}

lazy_static! {
    static ref RULES: Vec<TransformRule> = vec![
        TransformRule {
            name: "watermark",
            recognize: watermark::recognize,
            already_applied: watermark::applied,
            apply: watermark::apply,
        },
        TransformRule {
            name: "qr-code",
            recognize: qrcode::recognize,
            already_applied: qrcode::applied,
            apply: qrcode::apply,
        },
        TransformRule {
            name: "header-color",
            recognize: color::recognize_header,
            already_applied: color::applied_header,
            apply: color::apply_header,
        },
        TransformRule {
            name: "background-color",
            recognize: color::recognize_background,
            already_applied: color::applied_background,
            apply: color::apply_background,
        },
        TransformRule {
            name: "text-color",
            recognize: color::recognize_text,
            already_applied: color::applied_text,
            apply: color::apply_text,
        },
        TransformRule {
            name: "font-size-up",
            recognize: typography::recognize_size_up,
            already_applied: typography::applied_size_up,
            apply: typography::apply_size_up,
        },
        TransformRule {
            name: "font-size-down",
            recognize: typography::recognize_size_down,
            already_applied: typography::applied_size_down,
            apply: typography::apply_size_down,
        },
        TransformRule {
            name: "bold",
            recognize: typography::recognize_bold,
            already_applied: typography::applied_bold,
            apply: typography::apply_bold,
        },
        TransformRule {
            name: "italic",
            recognize: typography::recognize_italic,
            already_applied: typography::applied_italic,
            apply: typography::apply_italic,
        },
        TransformRule {
            name: "font-family",
            recognize: typography::recognize_family,
            already_applied: typography::applied_family,
            apply: typography::apply_family,
        },
        TransformRule {
            name: "zebra",
            recognize: layout::recognize_zebra,
            already_applied: layout::applied_zebra,
            apply: layout::apply_zebra,
        },
        TransformRule {
            name: "borders",
            recognize: layout::recognize_borders,
            already_applied: layout::applied_borders,
            apply: layout::apply_borders,
        },
        TransformRule {
            name: "borders-off",
            recognize: layout::recognize_borders_off,
            already_applied: layout::applied_borders_off,
            apply: layout::apply_borders_off,
        },
        TransformRule {
            name: "signature",
            recognize: blocks::recognize_signature,
            already_applied: blocks::applied_signature,
            apply: blocks::apply_signature,
        },
        TransformRule {
            name: "thankyou",
            recognize: blocks::recognize_thankyou,
            already_applied: blocks::applied_thankyou,
            apply: blocks::apply_thankyou,
        },
    ];
}

pub fn rules() -> &'static [TransformRule] {
    &RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<&str> = rules().iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rules().len());
    }

    #[test]
    fn test_catalog_covers_all_effect_families() {
        let names: Vec<&str> = rules().iter().map(|r| r.name).collect();
        for expected in [
            "watermark",
            "qr-code",
            "header-color",
            "font-family",
            "zebra",
            "borders",
            "borders-off",
            "signature",
            "thankyou",
        ] {
            assert!(names.contains(&expected), "missing rule {expected}");
        }
    }
}
