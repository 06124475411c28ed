use serde::{Deserialize, Serialize};

/// Share of active questions (percent) that must be answered before an
/// assessment may be finalized without `force`.
pub const DEFAULT_COMPLETION_THRESHOLD: f64 = 80.0;

/// Lower bounds of the maturity bands above the bottom one.
///
/// A score at exactly a bound belongs to the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaturityThresholds {
    #[serde(default = "default_assisted")]
    pub assisted: f64,

    #[serde(default = "default_augmented")]
    pub augmented: f64,

    #[serde(default = "default_first")]
    pub first: f64,
}

impl Default for MaturityThresholds {
    fn default() -> Self {
        Self {
            assisted: default_assisted(),
            augmented: default_augmented(),
            first: default_first(),
        }
    }
}

/// Threshold configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    /// Completion gate for finalization, in percent
    #[serde(default = "default_completion_percentage")]
    pub completion_percentage: f64,

    #[serde(default)]
    pub maturity: MaturityThresholds,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            completion_percentage: default_completion_percentage(),
            maturity: MaturityThresholds::default(),
        }
    }
}

impl ThresholdsConfig {
    pub fn validation_errors(&self) -> Vec<String> {
        use super::scoring::{MAX_SCORE, MIN_SCORE};

        let mut errors = Vec::new();
        let m = &self.maturity;
        let bounds = [MIN_SCORE, m.assisted, m.augmented, m.first, MAX_SCORE];
        if !bounds.windows(2).all(|w| w[0] < w[1]) {
            errors.push(format!(
                "Maturity thresholds must ascend strictly within ({}, {}): got {}, {}, {}",
                MIN_SCORE, MAX_SCORE, m.assisted, m.augmented, m.first
            ));
        }
        if !(self.completion_percentage > 0.0 && self.completion_percentage <= 100.0) {
            errors.push(format!(
                "completion_percentage must be in (0, 100], got {}",
                self.completion_percentage
            ));
        }
        errors
    }
}

fn default_assisted() -> f64 {
    1.8
}
fn default_augmented() -> f64 {
    2.5
}
fn default_first() -> f64 {
    3.3
}
fn default_completion_percentage() -> f64 {
    DEFAULT_COMPLETION_THRESHOLD
}
