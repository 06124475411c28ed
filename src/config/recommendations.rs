use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recommendation generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// JSON template file; the built-in templates are used when unset or missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_path: Option<PathBuf>,

    /// Upper bound on ranked recommendations kept in a report
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// How far above the current section score a recommendation aims
    #[serde(default = "default_target_score_step")]
    pub target_score_step: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            templates_path: None,
            max_recommendations: default_max_recommendations(),
            target_score_step: default_target_score_step(),
        }
    }
}

impl RecommendationConfig {
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_recommendations == 0 {
            errors.push("max_recommendations must be at least 1".to_string());
        }
        if !(self.target_score_step > 0.0 && self.target_score_step <= 3.0) {
            errors.push(format!(
                "target_score_step must be in (0, 3], got {}",
                self.target_score_step
            ));
        }
        errors
    }
}

fn default_max_recommendations() -> usize {
    20
}

fn default_target_score_step() -> f64 {
    0.8
}
