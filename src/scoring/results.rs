//! The scoring pipeline for one assessment and the results it produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::config::DeviqConfig;
use crate::errors::Result;
use crate::model::{Assessment, AssessmentId, Questionnaire, Response};
use crate::scoring::aggregate::{format_score_display, ScoreAggregator, SectionScores};
use crate::scoring::completion::{CompletionGate, CompletionStatus, SectionProgress};
use crate::scoring::maturity::{
    calculate_improvement_potential, ImprovementPotential, MaturityDetails, MaturityLevel,
};

pub const SCORING_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringMetadata {
    pub calculated_at: DateTime<Utc>,
    pub total_responses: usize,
    pub scoring_version: String,
}

/// Everything computed for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub assessment_id: AssessmentId,
    pub assessment_name: String,
    pub deviq_score: f64,
    pub deviq_score_display: String,
    pub maturity_level: MaturityLevel,
    pub maturity_level_display: String,
    pub maturity_details: MaturityDetails,
    pub section_scores: SectionScores,
    pub improvement_potential: ImprovementPotential,
    pub completion_status: CompletionStatus,
    pub scoring_metadata: ScoringMetadata,
}

/// Runs aggregation, classification and completion tracking over stored
/// responses with injected questionnaire and configuration.
pub struct ScoringEngine<'a> {
    questionnaire: &'a Questionnaire,
    config: &'a DeviqConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(questionnaire: &'a Questionnaire, config: &'a DeviqConfig) -> Self {
        Self {
            questionnaire,
            config,
        }
    }

    pub fn gate(&self) -> CompletionGate {
        CompletionGate::new(self.config.completion_threshold())
    }

    pub fn completion_status(&self, responses: &[Response]) -> CompletionStatus {
        let answered = ScoreAggregator::new(self.questionnaire, self.config, responses)
            .answered_count();
        CompletionStatus::new(
            answered,
            self.questionnaire.total_questions(),
            self.config.completion_threshold(),
        )
    }

    pub fn section_progress(&self, responses: &[Response]) -> Vec<SectionProgress> {
        self.questionnaire
            .sections()
            .iter()
            .map(|section| {
                let answered = self
                    .questionnaire
                    .areas_in(&section.id)
                    .flat_map(|area| self.questionnaire.questions_in(&area.id))
                    .filter(|q| responses.iter().any(|r| r.question_id == q.id))
                    .count();
                SectionProgress::new(
                    &section.id,
                    &section.name,
                    answered,
                    self.questionnaire.section_question_count(&section.id),
                )
            })
            .collect()
    }

    pub fn score(&self, assessment: &Assessment, responses: &[Response]) -> Result<AssessmentResults> {
        let span = info_span!("score_assessment", assessment_id = assessment.id);
        let _guard = span.enter();

        let aggregator = ScoreAggregator::new(self.questionnaire, self.config, responses);
        let section_scores = aggregator.section_scores()?;
        let deviq_score = aggregator.overall_score(&section_scores)?;
        debug!(sections = section_scores.len(), deviq_score, "Aggregated section scores");

        let thresholds = &self.config.thresholds.maturity;
        let maturity_level = thresholds.classify(deviq_score)?;
        let improvement_potential = calculate_improvement_potential(deviq_score, None, thresholds)?;
        let completion_status = self.completion_status(responses);

        info!(
            deviq_score,
            maturity_level = %maturity_level,
            completion = completion_status.completion_percentage,
            "Assessment scored"
        );

        Ok(AssessmentResults {
            assessment_id: assessment.id,
            assessment_name: assessment.display_name(),
            deviq_score,
            deviq_score_display: format_score_display(
                deviq_score,
                self.config.scoring.display_precision,
            ),
            maturity_level,
            maturity_level_display: maturity_level.display_name().to_string(),
            maturity_details: maturity_level.details(),
            section_scores,
            improvement_potential,
            completion_status,
            scoring_metadata: ScoringMetadata {
                calculated_at: assessment.updated_at,
                total_responses: responses.len(),
                scoring_version: SCORING_VERSION.to_string(),
            },
        })
    }
}
