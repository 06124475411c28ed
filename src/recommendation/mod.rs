//! Recommendation selection: template lookup per section, keyword-derived
//! metadata, ranking and the improvement roadmap.

pub mod classifier;
pub mod priority;
pub mod roadmap;
pub mod templates;
pub mod types;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, info_span};

use crate::config::{normalize_key, DeviqConfig, MaturityThresholds, RecommendationConfig, MAX_SCORE};
use crate::errors::Result;
use crate::model::{ProgressionCatalog, Questionnaire};
use crate::scoring::{in_display_order, AssessmentResults, SectionScore};

pub use classifier::{
    classify_recommendation_type, estimate_impact_feasibility, extract_recommendation_tags,
    KeywordClassifier, RecommendationClassifier, TextClassification,
};
pub use priority::{
    calculate_recommendation_priority, deduplicate, estimate_implementation_effort,
    rank_recommendations, ranking_score, section_complexity_factor,
};
pub use roadmap::{
    categorize, summarize, AreaFocus, CategorizedRecommendations, ImprovementRoadmap,
    RecommendationSummary, RoadmapAssembler, RoadmapPhase,
};
pub use templates::{transition_key, RecommendationTemplates, TemplateSource};
pub use types::{
    EffortEstimate, EffortLevel, FeasibilityLevel, ImpactLevel, Priority, Rating,
    Recommendation, RecommendationType,
};

/// Section weight applied when ranking priority within one assessment.
const PRIORITY_SECTION_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    /// Falls back to the configured maximum
    pub max_recommendations: Option<usize>,
    /// Keep only these types when set
    pub include_types: Option<Vec<RecommendationType>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Ranked, deduplicated and truncated
    pub all: Vec<Recommendation>,
    /// Every recommendation of each section before filtering
    pub by_section: BTreeMap<String, Vec<Recommendation>>,
    pub by_type: CategorizedRecommendations,
    pub summary: RecommendationSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub assessment_id: u64,
    pub assessment_name: String,
    pub deviq_score: f64,
    pub maturity_level: String,
    pub total_recommendations: usize,
    pub recommendations: RecommendationSet,
    pub improvement_roadmap: ImprovementRoadmap,
}

impl RecommendationReport {
    pub fn by_section(&self, section_name: &str) -> &[Recommendation] {
        self.recommendations
            .by_section
            .get(&normalize_key(section_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn quick_wins(&self, limit: usize) -> &[Recommendation] {
        let quick_wins = &self.recommendations.by_type.quick_wins;
        &quick_wins[..limit.min(quick_wins.len())]
    }

    pub fn by_priority(&self, priority: Priority, limit: usize) -> Vec<&Recommendation> {
        self.recommendations
            .all
            .iter()
            .filter(|rec| rec.priority == priority)
            .take(limit)
            .collect()
    }
}

/// Turns scored results into recommendations using injected templates,
/// classifier and configuration.
pub struct RecommendationEngine<'a> {
    templates: &'a RecommendationTemplates,
    classifier: &'a dyn RecommendationClassifier,
    config: &'a RecommendationConfig,
    thresholds: &'a MaturityThresholds,
    roadmap: RoadmapAssembler<'a>,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(
        templates: &'a RecommendationTemplates,
        classifier: &'a dyn RecommendationClassifier,
        config: &'a DeviqConfig,
        questionnaire: &'a Questionnaire,
        progressions: &'a ProgressionCatalog,
    ) -> Self {
        Self {
            templates,
            classifier,
            config: &config.recommendations,
            thresholds: &config.thresholds.maturity,
            roadmap: RoadmapAssembler::new(
                questionnaire,
                progressions,
                &config.thresholds.maturity,
            ),
        }
    }

    /// Recommendations for moving one section up a single level.
    pub fn section_recommendations(
        &self,
        section_key: &str,
        section: &SectionScore,
    ) -> Result<Vec<Recommendation>> {
        let current_level = self.thresholds.classify(section.score)?;
        let target_level = current_level.next().unwrap_or(current_level);
        let texts = self
            .templates
            .lookup(current_level.number(), target_level.number(), section_key);
        if texts.is_empty() {
            debug!(
                section = section_key,
                transition = %transition_key(current_level.number(), target_level.number()),
                "No recommendation templates for section"
            );
        }

        let current_score = section.score;
        let target_score = (current_score + self.config.target_score_step).min(MAX_SCORE);
        let complexity = section_complexity_factor(current_score);

        let recommendations = texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let classification = self.classifier.classify(text);
                Recommendation {
                    id: format!("{}_{}", section_key, index + 1),
                    text: text.clone(),
                    section: section.section_name.clone(),
                    section_key: section_key.to_string(),
                    current_level,
                    target_level,
                    rec_type: classification.rec_type,
                    priority: calculate_recommendation_priority(
                        classification.impact,
                        classification.feasibility,
                        current_score,
                        PRIORITY_SECTION_WEIGHT,
                    ),
                    impact: classification.impact,
                    feasibility: classification.feasibility,
                    current_score,
                    target_score,
                    score_improvement: target_score - current_score,
                    effort_estimate: estimate_implementation_effort(
                        classification.rec_type,
                        complexity,
                    ),
                    tags: self.classifier.tags(text),
                }
            })
            .collect();

        Ok(recommendations)
    }

    pub fn generate(
        &self,
        results: &AssessmentResults,
        options: &GenerationOptions,
    ) -> Result<RecommendationReport> {
        let span = info_span!("generate_recommendations", assessment_id = results.assessment_id);
        let _guard = span.enter();

        let mut all = Vec::new();
        let mut by_section = BTreeMap::new();
        for (key, section) in in_display_order(&results.section_scores) {
            let section_recs = self.section_recommendations(key, section)?;
            all.extend(section_recs.iter().cloned());
            by_section.insert(key.clone(), section_recs);
        }

        if let Some(types) = &options.include_types {
            all.retain(|rec| types.contains(&rec.rec_type));
        }

        let limit = options
            .max_recommendations
            .unwrap_or(self.config.max_recommendations);
        let mut top = deduplicate(rank_recommendations(all));
        top.truncate(limit);

        let summary = summarize(results, &top);
        let improvement_roadmap = self.roadmap.assemble(results, &top);
        info!(
            recommendations = top.len(),
            high_priority = summary.by_priority.high,
            "Generated recommendations"
        );

        Ok(RecommendationReport {
            assessment_id: results.assessment_id,
            assessment_name: results.assessment_name.clone(),
            deviq_score: results.deviq_score,
            maturity_level: results.maturity_level_display.clone(),
            total_recommendations: top.len(),
            recommendations: RecommendationSet {
                by_type: categorize(&top),
                all: top,
                by_section,
                summary,
            },
            improvement_roadmap,
        })
    }
}
