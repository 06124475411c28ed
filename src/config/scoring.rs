use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest value on the answer scale; also the score of an area nobody answered.
pub const MIN_SCORE: f64 = 1.0;
/// Highest value on the answer scale.
pub const MAX_SCORE: f64 = 4.0;

/// Section keys of the standard questionnaire, in display order.
pub const STANDARD_SECTIONS: [&str; 4] = [
    "foundational_capabilities",
    "transformation_capabilities",
    "enterprise_integration",
    "strategic_governance",
];

/// Score aggregation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Decimal places used when a score is rendered for display
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,

    /// Weight used for sections missing from `section_weights`
    #[serde(default = "default_section_weight")]
    pub default_section_weight: f64,

    /// Weight of each section in the overall score, keyed by section key
    #[serde(default = "default_section_weights")]
    pub section_weights: BTreeMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            display_precision: default_display_precision(),
            default_section_weight: default_section_weight(),
            section_weights: default_section_weights(),
        }
    }
}

impl ScoringConfig {
    /// Weight of a section in the overall score.
    pub fn section_weight(&self, section_key: &str) -> f64 {
        self.section_weights
            .get(section_key)
            .copied()
            .unwrap_or(self.default_section_weight)
    }

    // Pure function: Validate a single weight with name
    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if weight.is_finite() && weight >= 0.0 {
            Ok(())
        } else {
            Err(format!("{} weight must be a non-negative number", name))
        }
    }

    /// Collect every problem instead of stopping at the first one.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .section_weights
            .iter()
            .filter_map(|(key, weight)| Self::validate_weight(*weight, key).err())
            .collect();

        if let Err(e) = Self::validate_weight(self.default_section_weight, "Default section") {
            errors.push(e);
        }

        // Keys for sections outside the standard set do not rescue a zero total.
        let standard_sum: f64 = STANDARD_SECTIONS
            .iter()
            .map(|key| self.section_weight(key))
            .sum();
        if standard_sum <= 0.0 {
            errors.push("Section weights must not all be zero".to_string());
        }

        if self.display_precision > 4 {
            errors.push("display_precision must be between 0 and 4".to_string());
        }

        errors
    }
}

fn default_display_precision() -> usize {
    1
}

fn default_section_weight() -> f64 {
    0.25
}

fn default_section_weights() -> BTreeMap<String, f64> {
    STANDARD_SECTIONS
        .iter()
        .map(|key| (key.to_string(), default_section_weight()))
        .collect()
}
