use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::AssessmentId;
use crate::scoring::{AssessmentResults, MaturityLevel};

/// Score series across several assessments, in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrends {
    pub assessment_count: usize,
    pub assessment_ids: Vec<AssessmentId>,
    pub deviq_scores: Vec<f64>,
    pub maturity_levels: Vec<MaturityLevel>,
    pub section_trends: BTreeMap<String, Vec<f64>>,
}

impl ScoreTrends {
    /// `requested` counts every assessment asked for, including any that
    /// could not be scored and were left out of the series.
    pub fn new(requested: usize) -> Self {
        Self {
            assessment_count: requested,
            ..Self::default()
        }
    }

    pub fn push(&mut self, results: &AssessmentResults) {
        self.assessment_ids.push(results.assessment_id);
        self.deviq_scores.push(results.deviq_score);
        self.maturity_levels.push(results.maturity_level);
        for (key, section) in &results.section_scores {
            self.section_trends
                .entry(key.clone())
                .or_default()
                .push(section.score);
        }
    }

    /// Change between the first and last scored assessment.
    pub fn overall_change(&self) -> Option<f64> {
        match (self.deviq_scores.first(), self.deviq_scores.last()) {
            (Some(first), Some(last)) if self.deviq_scores.len() > 1 => Some(last - first),
            _ => None,
        }
    }
}
