use serde::{Deserialize, Serialize};

use super::recommendations::RecommendationConfig;
use super::scoring::ScoringConfig;
use super::thresholds::ThresholdsConfig;
use crate::errors::{Error, Result};

/// Root configuration structure for deviq
///
/// Loaded once at startup and handed to the scoring and recommendation
/// components by reference; nothing in the crate reads configuration from a
/// global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DeviqConfig {
    /// Score aggregation settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Maturity bands and the completion gate
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Recommendation generation settings
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

impl DeviqConfig {
    /// Validate every section, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let errors: Vec<String> = self
            .scoring
            .validation_errors()
            .into_iter()
            .chain(self.thresholds.validation_errors())
            .chain(self.recommendations.validation_errors())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::configuration(errors.join("; ")))
        }
    }

    pub fn completion_threshold(&self) -> f64 {
        self.thresholds.completion_percentage
    }
}
