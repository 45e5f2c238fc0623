//! Per-template integrity configuration.
//!
//! The required-field list and the content-loss thresholds are explicit
//! configuration rather than naming conventions baked into the checker, so a
//! template can declare which markers must never be dropped by an edit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse integrity config: {0}")]
    ParseError(String),

    #[error("Invalid content loss ratio {0} (must be within 0.0..=1.0)")]
    InvalidRatio(f64),
}

/// Tunables for the output integrity checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityConfig {
    /// Field markers that must survive any edit regardless of naming.
    /// Missing ones are reported at Critical severity.
    #[serde(default)]
    pub critical_fields: Vec<String>,

    /// Candidate shorter than `original * ratio` counts as content loss.
    #[serde(default = "default_content_loss_ratio")]
    pub content_loss_ratio: f64,

    /// Originals at or below this length skip the content-loss check,
    /// avoiding false positives on tiny documents.
    #[serde(default = "default_min_length_floor")]
    pub min_length_floor: usize,
}

fn default_content_loss_ratio() -> f64 {
    0.5
}

fn default_min_length_floor() -> usize {
    200
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            critical_fields: Vec::new(),
            content_loss_ratio: default_content_loss_ratio(),
            min_length_floor: default_min_length_floor(),
        }
    }
}

impl IntegrityConfig {
    /// Load a per-template config from JSON, validating the loss ratio.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        if !(0.0..=1.0).contains(&config.content_loss_ratio) {
            return Err(ConfigError::InvalidRatio(config.content_loss_ratio));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntegrityConfig::default();
        assert!(config.critical_fields.is_empty());
        assert_eq!(config.content_loss_ratio, 0.5);
        assert_eq!(config.min_length_floor, 200);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = IntegrityConfig::from_json(r#"{"critical_fields": ["totals.grand"]}"#)
            .expect("config should parse");
        assert_eq!(config.critical_fields, vec!["totals.grand".to_string()]);
        assert_eq!(config.content_loss_ratio, 0.5);
    }

    #[test]
    fn test_from_json_rejects_bad_ratio() {
        let result = IntegrityConfig::from_json(r#"{"content_loss_ratio": 1.5}"#);
        assert!(matches!(result, Err(ConfigError::InvalidRatio(_))));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = IntegrityConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}

// ============================================================================
// PROPERTY TESTS - Fuzz testing for config parsing
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: parsing never panics on arbitrary input
        #[test]
        fn from_json_no_panic(input in "\\PC*") {
            let _ = IntegrityConfig::from_json(&input);
        }

        /// Property: any in-range ratio parses and is preserved
        #[test]
        fn in_range_ratio_accepted(ratio in 0.0f64..=1.0) {
            let json = format!(r#"{{"content_loss_ratio": {ratio}}}"#);
            let config = IntegrityConfig::from_json(&json).unwrap();
            prop_assert_eq!(config.content_loss_ratio, ratio);
        }

        /// Property: any out-of-range ratio is rejected with InvalidRatio
        #[test]
        fn out_of_range_ratio_rejected(ratio in 1.0f64..1000.0) {
            prop_assume!(ratio > 1.0);
            let json = format!(r#"{{"content_loss_ratio": {ratio}}}"#);
            let result = IntegrityConfig::from_json(&json);
            prop_assert!(matches!(result, Err(ConfigError::InvalidRatio(_))));
        }
    }
}
