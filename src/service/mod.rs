//! Assessment lifecycle: creation, answering, progress, scoring,
//! recommendations and finalization over an [`AssessmentStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, info_span, warn};

use crate::config::{normalize_key, DeviqConfig};
use crate::errors::{Error, Result};
use crate::model::{
    Assessment, AssessmentId, AssessmentMetadata, AssessmentStatus, ProgressionCatalog, Question,
    Questionnaire, Response, Score,
};
use crate::recommendation::{
    GenerationOptions, KeywordClassifier, Priority, Recommendation, RecommendationClassifier,
    RecommendationEngine, RecommendationReport, RecommendationTemplates, RecommendationType,
};
use crate::scoring::{
    section_benchmark, AssessmentResults, CompletionStatus, ScoreTrends, ScoringEngine,
    SectionBenchmark, SectionProgress,
};
use crate::store::{AssessmentStore, FinalizeOutcome, InMemoryStore};

/// One answer as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseInput {
    pub question_id: String,
    pub score: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentProgress {
    pub assessment_id: AssessmentId,
    pub status: AssessmentStatus,
    pub completion: CompletionStatus,
    pub sections: Vec<SectionProgress>,
    pub last_response_at: Option<DateTime<Utc>>,
}

/// Results and recommendations frozen when an assessment is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedAssessment {
    pub assessment_id: AssessmentId,
    pub completed_at: DateTime<Utc>,
    pub results: AssessmentResults,
    pub recommendations: RecommendationReport,
}

pub struct AssessmentService<S: AssessmentStore = InMemoryStore> {
    store: S,
    questionnaire: Questionnaire,
    config: DeviqConfig,
    templates: RecommendationTemplates,
    progressions: ProgressionCatalog,
    classifier: Box<dyn RecommendationClassifier>,
}

impl<S: AssessmentStore> AssessmentService<S> {
    pub fn new(store: S, questionnaire: Questionnaire, config: DeviqConfig) -> Self {
        Self {
            store,
            questionnaire,
            config,
            templates: RecommendationTemplates::builtin(),
            progressions: ProgressionCatalog::default(),
            classifier: Box::new(KeywordClassifier),
        }
    }

    pub fn with_templates(mut self, templates: RecommendationTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_progressions(mut self, progressions: ProgressionCatalog) -> Self {
        self.progressions = progressions;
        self
    }

    pub fn with_classifier(mut self, classifier: impl RecommendationClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn config(&self) -> &DeviqConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn scoring(&self) -> ScoringEngine<'_> {
        ScoringEngine::new(&self.questionnaire, &self.config)
    }

    fn recommender(&self) -> RecommendationEngine<'_> {
        RecommendationEngine::new(
            &self.templates,
            self.classifier.as_ref(),
            &self.config,
            &self.questionnaire,
            &self.progressions,
        )
    }

    pub fn create_assessment(&self, metadata: AssessmentMetadata) -> Result<Assessment> {
        let metadata = metadata.validated()?;
        let assessment = self.store.create_assessment(metadata, Utc::now())?;
        info!(assessment_id = assessment.id, "Created assessment");
        Ok(assessment)
    }

    pub fn assessment(&self, id: AssessmentId) -> Result<Assessment> {
        self.store.assessment(id)
    }

    fn validate_input(&self, id: AssessmentId, input: &ResponseInput) -> Result<Response> {
        let score = Score::new(input.score)?;
        let question = self
            .questionnaire
            .question(&input.question_id)
            .ok_or_else(|| Error::not_found("Question", &input.question_id))?;
        if !question.is_active {
            return Err(Error::validation(format!(
                "Question '{}' is not active",
                question.id
            )));
        }

        Ok(Response {
            assessment_id: id,
            question_id: question.id.clone(),
            score,
            notes: input
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            answered_at: Utc::now(),
        })
    }

    pub fn submit_response(&self, id: AssessmentId, input: &ResponseInput) -> Result<Response> {
        let response = self.validate_input(id, input)?;
        let stored = self.store.upsert_response(response)?;
        debug!(
            assessment_id = id,
            question_id = %stored.question_id,
            score = stored.score.value(),
            "Recorded response"
        );
        Ok(stored)
    }

    /// Validate every answer first so a bad entry stores nothing.
    pub fn submit_responses(
        &self,
        id: AssessmentId,
        inputs: &[ResponseInput],
    ) -> Result<Vec<Response>> {
        let mut errors = Vec::new();
        let mut responses = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            match self.validate_input(id, input) {
                Ok(response) => responses.push(response),
                Err(e) => errors.push(format!("Response {}: {}", index + 1, e)),
            }
        }
        if !errors.is_empty() {
            return Err(Error::validation(errors.join("; ")));
        }

        let stored = responses
            .into_iter()
            .map(|response| self.store.upsert_response(response))
            .collect::<Result<Vec<_>>>()?;
        info!(assessment_id = id, responses = stored.len(), "Recorded responses");
        Ok(stored)
    }

    pub fn progress(&self, id: AssessmentId) -> Result<AssessmentProgress> {
        let assessment = self.store.assessment(id)?;
        let responses = self.store.responses(id)?;
        let scoring = self.scoring();

        Ok(AssessmentProgress {
            assessment_id: id,
            status: assessment.status,
            completion: scoring.completion_status(&responses),
            sections: scoring.section_progress(&responses),
            last_response_at: responses.iter().map(|r| r.answered_at).max(),
        })
    }

    /// First unanswered active question in section, area and question order.
    pub fn next_question(&self, id: AssessmentId) -> Result<Option<&Question>> {
        let responses = self.store.responses(id)?;
        let answered: HashSet<&str> = responses.iter().map(|r| r.question_id.as_str()).collect();
        Ok(self
            .questionnaire
            .ordered_questions()
            .find(|q| !answered.contains(q.id.as_str())))
    }

    pub fn calculate_assessment_score(&self, id: AssessmentId) -> Result<AssessmentResults> {
        let assessment = self.store.assessment(id)?;
        let responses = self.store.responses(id)?;
        self.scoring().score(&assessment, &responses)
    }

    pub fn generate_recommendations(
        &self,
        id: AssessmentId,
        options: &GenerationOptions,
    ) -> Result<RecommendationReport> {
        let results = self.calculate_assessment_score(id)?;
        self.recommender().generate(&results, options)
    }

    pub fn recommendations_for_section(
        &self,
        id: AssessmentId,
        section_name: &str,
    ) -> Result<Vec<Recommendation>> {
        let report = self.generate_recommendations(id, &GenerationOptions::default())?;
        Ok(report.by_section(section_name).to_vec())
    }

    pub fn quick_wins(&self, id: AssessmentId, limit: usize) -> Result<Vec<Recommendation>> {
        let options = GenerationOptions {
            include_types: Some(vec![RecommendationType::QuickWin]),
            ..GenerationOptions::default()
        };
        let report = self.generate_recommendations(id, &options)?;
        Ok(report.quick_wins(limit).to_vec())
    }

    pub fn priority_recommendations(
        &self,
        id: AssessmentId,
        priority: Priority,
        limit: usize,
    ) -> Result<Vec<Recommendation>> {
        let report = self.generate_recommendations(id, &GenerationOptions::default())?;
        Ok(report
            .by_priority(priority, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Score, gate, recommend and freeze an assessment.
    ///
    /// Both the first call and any later call return the results as stored,
    /// so repeated finalization yields identical values whatever `force` says.
    pub fn finalize(&self, id: AssessmentId, force: bool) -> Result<FinalizedAssessment> {
        let span = info_span!("finalize", assessment_id = id, force);
        let _guard = span.enter();

        let outcome = self.store.finalize_with(id, &mut |current, responses| {
            let scoring = self.scoring();
            let completion = scoring.completion_status(responses);
            scoring.gate().check(
                completion.answered_questions,
                completion.total_questions,
                force,
            )?;

            let now = Utc::now();
            let mut completed = current.clone();
            completed.updated_at = now;
            completed.completed_at = Some(now);

            let results = scoring.score(&completed, responses)?;
            let recommendations = self
                .recommender()
                .generate(&results, &GenerationOptions::default())?;

            completed.overall_score = Some(results.deviq_score);
            completed.maturity_level = Some(results.maturity_level);
            completed.section_scores = results
                .section_scores
                .iter()
                .map(|(key, section)| (key.clone(), section.score))
                .collect();

            let finalized = FinalizedAssessment {
                assessment_id: id,
                completed_at: now,
                results,
                recommendations,
            };
            completed.results_json = Some(serde_json::to_string(&finalized)?);
            Ok(completed)
        })?;

        match outcome {
            FinalizeOutcome::Finalized(assessment) => {
                info!(
                    deviq_score = ?assessment.overall_score,
                    maturity_level = ?assessment.maturity_level,
                    "Assessment finalized"
                );
                Self::frozen_results(&assessment)
            }
            FinalizeOutcome::AlreadyCompleted(assessment) => {
                info!("Assessment already completed, returning frozen results");
                Self::frozen_results(&assessment)
            }
        }
    }

    /// Frozen results of a completed assessment.
    pub fn finalized_results(&self, id: AssessmentId) -> Result<Option<FinalizedAssessment>> {
        let assessment = self.store.assessment(id)?;
        if !assessment.is_completed() {
            return Ok(None);
        }
        Self::frozen_results(&assessment).map(Some)
    }

    fn frozen_results(assessment: &Assessment) -> Result<FinalizedAssessment> {
        let json = assessment.results_json.as_deref().ok_or_else(|| {
            Error::assessment(format!(
                "Completed assessment {} has no stored results",
                assessment.id
            ))
        })?;
        Ok(serde_json::from_str(json)?)
    }

    /// Scores across several assessments. Assessments that cannot be scored
    /// are left out with a warning.
    pub fn score_trends(&self, ids: &[AssessmentId]) -> ScoreTrends {
        let mut trends = ScoreTrends::new(ids.len());
        for &id in ids {
            match self.calculate_assessment_score(id) {
                Ok(results) => trends.push(&results),
                Err(e) => warn!(assessment_id = id, error = %e, "Skipping assessment in trends"),
            }
        }
        trends
    }

    pub fn section_benchmark(&self, section_name: &str) -> SectionBenchmark {
        section_benchmark(&normalize_key(section_name))
    }
}
