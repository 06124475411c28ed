//! Bucketing, summary and the improvement roadmap.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::config::MaturityThresholds;
use crate::model::{ProgressionCatalog, ProgressionGuidance, Questionnaire};
use crate::scoring::{in_display_order, AssessmentResults, MaturityLevel};

use super::types::{Priority, Recommendation, RecommendationType};

const IMMEDIATE_ACTION_LIMIT: usize = 5;
const QUICK_WIN_LIMIT: usize = 3;
const FOUNDATIONAL_LIMIT: usize = 5;
const AREA_FOCUS_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedRecommendations {
    pub quick_wins: Vec<Recommendation>,
    pub foundational: Vec<Recommendation>,
    pub strategic: Vec<Recommendation>,
    pub transformational: Vec<Recommendation>,
}

impl CategorizedRecommendations {
    pub fn bucket(&self, rec_type: RecommendationType) -> &[Recommendation] {
        match rec_type {
            RecommendationType::QuickWin => &self.quick_wins,
            RecommendationType::Foundational => &self.foundational,
            RecommendationType::Strategic => &self.strategic,
            RecommendationType::Transformational => &self.transformational,
        }
    }
}

pub fn categorize(recommendations: &[Recommendation]) -> CategorizedRecommendations {
    let mut categorized = CategorizedRecommendations::default();
    for rec in recommendations {
        let bucket = match rec.rec_type {
            RecommendationType::QuickWin => &mut categorized.quick_wins,
            RecommendationType::Foundational => &mut categorized.foundational,
            RecommendationType::Strategic => &mut categorized.strategic,
            RecommendationType::Transformational => &mut categorized.transformational,
        };
        bucket.push(rec.clone());
    }
    categorized
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub quick_win: usize,
    pub foundational: usize,
    pub strategic: usize,
    pub transformational: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffortTotals {
    pub time_weeks: u32,
    pub resources_needed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total_count: usize,
    pub by_priority: PriorityCounts,
    pub by_type: TypeCounts,
    pub estimated_effort: EffortTotals,
    pub current_maturity: String,
    pub deviq_score: f64,
    /// Score still missing to reach the next maturity level
    pub improvement_potential: f64,
}

pub fn summarize(
    results: &AssessmentResults,
    recommendations: &[Recommendation],
) -> RecommendationSummary {
    let mut by_priority = PriorityCounts::default();
    let mut by_type = TypeCounts::default();
    let mut effort = EffortTotals::default();

    for rec in recommendations {
        match rec.priority {
            Priority::High => by_priority.high += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::Low => by_priority.low += 1,
        }
        match rec.rec_type {
            RecommendationType::QuickWin => by_type.quick_win += 1,
            RecommendationType::Foundational => by_type.foundational += 1,
            RecommendationType::Strategic => by_type.strategic += 1,
            RecommendationType::Transformational => by_type.transformational += 1,
        }
        effort.time_weeks += rec.effort_estimate.time_weeks;
        effort.resources_needed += rec.effort_estimate.resources_needed;
    }

    RecommendationSummary {
        total_count: recommendations.len(),
        by_priority,
        by_type,
        estimated_effort: effort,
        current_maturity: results.maturity_level_display.clone(),
        deviq_score: results.deviq_score,
        improvement_potential: results.improvement_potential.gap_to_target,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentState {
    pub deviq_score: f64,
    pub maturity_level: String,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub description: String,
    pub recommendations: Vec<Recommendation>,
    pub estimated_duration: String,
}

impl RoadmapPhase {
    fn new(description: &str, recommendations: Vec<Recommendation>, duration: &str) -> Self {
        Self {
            description: description.to_string(),
            recommendations,
            estimated_duration: duration.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    pub target_level: MaturityLevel,
    pub target_score: f64,
    pub estimated_timeline: String,
}

/// A weak area and the guidance for lifting it one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaFocus {
    pub area_id: String,
    pub area_name: String,
    pub section_key: String,
    pub current_score: f64,
    pub current_level: MaturityLevel,
    pub target_level: MaturityLevel,
    pub timeline: Option<String>,
    pub guidance: Option<ProgressionGuidance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementRoadmap {
    pub current_state: CurrentState,
    pub immediate_actions: RoadmapPhase,
    pub quick_wins: RoadmapPhase,
    pub foundational_improvements: RoadmapPhase,
    pub target_state: TargetState,
    #[serde(default)]
    pub area_focus: Vec<AreaFocus>,
}

impl ImprovementRoadmap {
    /// Plain-text improvement plan, one phase per paragraph.
    pub fn render_plan(&self) -> String {
        let mut plan = String::new();
        let _ = writeln!(
            plan,
            "Current state: {} (DevIQ {:.2}, {:.1}% answered)",
            self.current_state.maturity_level,
            self.current_state.deviq_score,
            self.current_state.completion_rate
        );

        for (title, phase) in [
            ("Immediate actions", &self.immediate_actions),
            ("Quick wins", &self.quick_wins),
            ("Foundational improvements", &self.foundational_improvements),
        ] {
            if phase.recommendations.is_empty() {
                continue;
            }
            let _ = writeln!(plan, "\n{} ({})", title, phase.estimated_duration);
            for rec in &phase.recommendations {
                let _ = writeln!(plan, "  - {} [{}]", rec.text, rec.section);
            }
        }

        if !self.area_focus.is_empty() {
            let _ = writeln!(plan, "\nFocus areas");
            for focus in &self.area_focus {
                let _ = writeln!(
                    plan,
                    "  - {} ({:.2}, {} -> {}){}",
                    focus.area_name,
                    focus.current_score,
                    focus.current_level,
                    focus.target_level,
                    focus
                        .timeline
                        .as_deref()
                        .map(|t| format!(": {}", t))
                        .unwrap_or_default()
                );
            }
        }

        let _ = writeln!(
            plan,
            "\nTarget: {} (score {:.1}) within {}",
            self.target_state.target_level.display_name(),
            self.target_state.target_score,
            self.target_state.estimated_timeline
        );
        plan
    }
}

fn first_matching(
    ranked: &[Recommendation],
    limit: usize,
    predicate: impl Fn(&Recommendation) -> bool,
) -> Vec<Recommendation> {
    ranked
        .iter()
        .filter(|rec| predicate(rec))
        .take(limit)
        .cloned()
        .collect()
}

/// Builds the roadmap from scored results and the ranked recommendations.
pub struct RoadmapAssembler<'a> {
    questionnaire: &'a Questionnaire,
    progressions: &'a ProgressionCatalog,
    thresholds: &'a MaturityThresholds,
}

impl<'a> RoadmapAssembler<'a> {
    pub fn new(
        questionnaire: &'a Questionnaire,
        progressions: &'a ProgressionCatalog,
        thresholds: &'a MaturityThresholds,
    ) -> Self {
        Self {
            questionnaire,
            progressions,
            thresholds,
        }
    }

    pub fn assemble(
        &self,
        results: &AssessmentResults,
        ranked: &[Recommendation],
    ) -> ImprovementRoadmap {
        ImprovementRoadmap {
            current_state: CurrentState {
                deviq_score: results.deviq_score,
                maturity_level: results.maturity_level_display.clone(),
                completion_rate: results.completion_status.completion_percentage,
            },
            immediate_actions: RoadmapPhase::new(
                "High-priority recommendations to implement first",
                first_matching(ranked, IMMEDIATE_ACTION_LIMIT, |r| r.priority == Priority::High),
                "2-4 weeks",
            ),
            quick_wins: RoadmapPhase::new(
                "Low-effort, high-impact improvements",
                first_matching(ranked, QUICK_WIN_LIMIT, |r| {
                    r.rec_type == RecommendationType::QuickWin
                }),
                "1-2 weeks",
            ),
            foundational_improvements: RoadmapPhase::new(
                "Core capability building initiatives",
                first_matching(ranked, FOUNDATIONAL_LIMIT, |r| {
                    r.rec_type == RecommendationType::Foundational
                }),
                "2-3 months",
            ),
            target_state: TargetState {
                target_level: results.improvement_potential.target_level,
                target_score: results.improvement_potential.target_min_score,
                estimated_timeline: "6-12 months".to_string(),
            },
            area_focus: self.area_focus(results),
        }
    }

    /// Lowest-scoring answered areas that still have a level to climb.
    pub fn area_focus(&self, results: &AssessmentResults) -> Vec<AreaFocus> {
        let mut candidates: Vec<(&String, _)> = in_display_order(&results.section_scores)
            .into_iter()
            .flat_map(|(key, section)| section.area_scores.iter().map(move |a| (key, a)))
            .filter(|(_, area)| area.is_answered())
            .collect();
        candidates.sort_by(|(_, a), (_, b)| a.score.total_cmp(&b.score));

        candidates
            .into_iter()
            .filter_map(|(section_key, area_score)| {
                let current_level = self.thresholds.classify(area_score.score).ok()?;
                let target_level = current_level.next()?;
                let progression = self
                    .progressions
                    .get(&area_score.area_id, target_level.number());
                let timeline = self
                    .questionnaire
                    .area(&area_score.area_id)
                    .and_then(|area| area.timeline_for(current_level.number()))
                    .map(String::from)
                    .or_else(|| progression.and_then(|p| p.timeline.clone()));

                Some(AreaFocus {
                    area_id: area_score.area_id.clone(),
                    area_name: area_score.area_name.clone(),
                    section_key: section_key.clone(),
                    current_score: area_score.score,
                    current_level,
                    target_level,
                    timeline,
                    guidance: progression.map(|p| p.guidance()),
                })
            })
            .take(AREA_FOCUS_LIMIT)
            .collect()
    }
}
