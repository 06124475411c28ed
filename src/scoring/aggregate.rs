//! Area, section and overall score aggregation.
//!
//! Question scores average into area scores, area scores into section scores
//! and section scores into the overall DevIQ score. Only answered questions
//! count towards an average. An area or section without answers scores
//! [`MIN_SCORE`] and reports zero coverage.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::config::{DeviqConfig, MAX_SCORE, MIN_SCORE};
use crate::errors::{Error, Result};
use crate::model::{Area, Questionnaire, Response, Score, Section};
use crate::scoring::maturity::MaturityLevel;

/// Weight given to each answered question and each area.
pub const EQUAL_WEIGHT: f64 = 1.0;

/// Weighted mean of `scores`. Without weights every score counts once.
pub fn calculate_weighted_average(scores: &[f64], weights: Option<&[f64]>) -> Result<f64> {
    if scores.is_empty() {
        return Err(Error::validation(
            "Cannot calculate average of empty scores list",
        ));
    }

    let (weighted_sum, total_weight) = match weights {
        Some(weights) => {
            if weights.len() != scores.len() {
                return Err(Error::validation(
                    "Scores and weights must have the same length",
                ));
            }
            scores
                .iter()
                .zip(weights)
                .fold((0.0, 0.0), |(sum, total), (s, w)| (sum + s * w, total + w))
        }
        None => (scores.iter().sum(), scores.len() as f64),
    };

    if total_weight == 0.0 {
        return Err(Error::validation("Total weight cannot be zero"));
    }

    Ok(weighted_sum / total_weight)
}

/// Check that scores lie on the 1-4 scale and weights are usable.
pub fn validate_score_inputs(scores: &[f64], weights: Option<&[f64]>) -> Result<()> {
    if scores.is_empty() {
        return Err(Error::validation("Scores list cannot be empty"));
    }
    if !scores.iter().all(|s| (MIN_SCORE..=MAX_SCORE).contains(s)) {
        return Err(Error::validation(format!(
            "All scores must be between {} and {}",
            MIN_SCORE, MAX_SCORE
        )));
    }

    if let Some(weights) = weights {
        if weights.len() != scores.len() {
            return Err(Error::validation(
                "Weights list must match scores list length",
            ));
        }
        if !weights.iter().all(|w| w.is_finite() && *w >= 0.0) {
            return Err(Error::validation("All weights must be non-negative"));
        }
        if weights.iter().sum::<f64>() == 0.0 {
            return Err(Error::validation("Sum of weights cannot be zero"));
        }
    }

    Ok(())
}

/// Rescale `score` from `[min_val, max_val]` onto the 1-4 scale, rounded to
/// two decimals. Values outside the source range are clamped first.
pub fn normalize_score(score: f64, min_val: f64, max_val: f64) -> f64 {
    if max_val == min_val {
        return MIN_SCORE;
    }
    let clamped = score.clamp(min_val.min(max_val), max_val.max(min_val));
    let normalized = (clamped - min_val) / (max_val - min_val) * (MAX_SCORE - MIN_SCORE) + MIN_SCORE;
    round_to(normalized, 2)
}

/// Fraction of questions answered, in `[0, 1]`.
pub fn calculate_section_coverage(responses_count: usize, total_questions: usize) -> f64 {
    if total_questions == 0 {
        return 0.0;
    }
    (responses_count as f64 / total_questions as f64).clamp(0.0, 1.0)
}

pub fn format_score_display(score: f64, precision: usize) -> String {
    format!("{:.*}", precision, score)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaScore {
    pub area_id: String,
    pub area_name: String,
    pub area_key: String,
    pub score: f64,
    pub score_display: String,
    pub weight: f64,
    pub responses_count: usize,
    pub total_questions: usize,
    pub coverage: f64,
}

impl AreaScore {
    pub fn is_answered(&self) -> bool {
        self.responses_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section_id: String,
    pub section_name: String,
    pub display_order: i32,
    pub score: f64,
    pub score_display: String,
    pub maturity_level: MaturityLevel,
    pub weight: f64,
    pub responses_count: usize,
    pub total_questions: usize,
    pub coverage: f64,
    /// Areas in display order
    pub area_scores: Vec<AreaScore>,
}

/// Section scores keyed by section key.
pub type SectionScores = BTreeMap<String, SectionScore>;

/// Sections of a result map in questionnaire display order.
pub fn in_display_order(scores: &SectionScores) -> Vec<(&String, &SectionScore)> {
    let mut ordered: Vec<_> = scores.iter().collect();
    ordered.sort_by_key(|(_, section)| section.display_order);
    ordered
}

/// Scores one assessment's responses against the questionnaire.
pub struct ScoreAggregator<'a> {
    questionnaire: &'a Questionnaire,
    config: &'a DeviqConfig,
    answers: HashMap<&'a str, Score>,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(
        questionnaire: &'a Questionnaire,
        config: &'a DeviqConfig,
        responses: &'a [Response],
    ) -> Self {
        let answers = responses
            .iter()
            .map(|r| (r.question_id.as_str(), r.score))
            .collect();
        Self {
            questionnaire,
            config,
            answers,
        }
    }

    /// Number of responses to active questions of the questionnaire.
    pub fn answered_count(&self) -> usize {
        self.questionnaire
            .ordered_questions()
            .filter(|q| self.answers.contains_key(q.id.as_str()))
            .count()
    }

    pub fn area_score(&self, area: &Area) -> Result<AreaScore> {
        let scores: Vec<f64> = self
            .questionnaire
            .questions_in(&area.id)
            .filter_map(|q| self.answers.get(q.id.as_str()))
            .map(|s| s.as_f64())
            .collect();
        let total_questions = self.questionnaire.questions_in(&area.id).count();

        let score = if scores.is_empty() {
            MIN_SCORE
        } else {
            validate_score_inputs(&scores, None)?;
            calculate_weighted_average(&scores, None)?
        };

        Ok(AreaScore {
            area_id: area.id.clone(),
            area_name: area.name.clone(),
            area_key: area.key(),
            score,
            score_display: self.display(score),
            weight: EQUAL_WEIGHT,
            responses_count: scores.len(),
            total_questions,
            coverage: calculate_section_coverage(scores.len(), total_questions),
        })
    }

    pub fn section_score(&self, section: &Section) -> Result<SectionScore> {
        let area_scores = self
            .questionnaire
            .areas_in(&section.id)
            .map(|area| self.area_score(area))
            .collect::<Result<Vec<_>>>()?;

        let score = if area_scores.is_empty() {
            MIN_SCORE
        } else {
            let scores: Vec<f64> = area_scores.iter().map(|a| a.score).collect();
            let weights: Vec<f64> = area_scores.iter().map(|a| a.weight).collect();
            validate_score_inputs(&scores, Some(&weights))?;
            calculate_weighted_average(&scores, Some(&weights))?
        };

        let responses_count = area_scores.iter().map(|a| a.responses_count).sum();
        let total_questions = area_scores.iter().map(|a| a.total_questions).sum();

        Ok(SectionScore {
            section_id: section.id.clone(),
            section_name: section.name.clone(),
            display_order: section.display_order,
            score,
            score_display: self.display(score),
            maturity_level: self.config.thresholds.maturity.classify(score)?,
            weight: self.config.scoring.section_weight(&section.key()),
            responses_count,
            total_questions,
            coverage: calculate_section_coverage(responses_count, total_questions),
            area_scores,
        })
    }

    pub fn section_scores(&self) -> Result<SectionScores> {
        self.questionnaire
            .sections()
            .iter()
            .map(|section| Ok((section.key(), self.section_score(section)?)))
            .collect()
    }

    /// Weighted mean of the section scores, clamped to the scale and
    /// rounded to two decimals.
    pub fn overall_score(&self, sections: &SectionScores) -> Result<f64> {
        if sections.is_empty() {
            return Ok(MIN_SCORE);
        }

        let ordered = in_display_order(sections);
        let scores: Vec<f64> = ordered.iter().map(|(_, s)| s.score).collect();
        let weights: Vec<f64> = ordered.iter().map(|(_, s)| s.weight).collect();
        if weights.iter().sum::<f64>() <= 0.0 {
            let keys: Vec<&str> = ordered.iter().map(|(key, _)| key.as_str()).collect();
            return Err(Error::configuration(format!(
                "Section weights sum to zero for sections: {}",
                keys.join(", ")
            )));
        }
        validate_score_inputs(&scores, Some(&weights))?;
        let overall = calculate_weighted_average(&scores, Some(&weights))?;

        Ok(round_to(overall.clamp(MIN_SCORE, MAX_SCORE), 2))
    }

    fn display(&self, score: f64) -> String {
        format_score_display(score, self.config.scoring.display_precision)
    }
}
