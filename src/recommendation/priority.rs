//! Priority, effort and ranking for recommendations.

use std::collections::HashSet;

use crate::config::MAX_SCORE;

use super::types::{
    EffortEstimate, EffortLevel, FeasibilityLevel, ImpactLevel, Priority, Recommendation,
    RecommendationType,
};

pub const HIGH_PRIORITY_THRESHOLD: f64 = 2.5;
pub const MEDIUM_PRIORITY_THRESHOLD: f64 = 1.5;

/// Lower current scores are more urgent.
pub fn calculate_recommendation_priority(
    impact: ImpactLevel,
    feasibility: FeasibilityLevel,
    current_score: f64,
    section_weight: f64,
) -> Priority {
    let urgency = (MAX_SCORE - current_score) / 3.0;
    let score = (f64::from(impact.weight()) * 0.4
        + f64::from(feasibility.weight()) * 0.4
        + urgency * 0.2)
        * section_weight;

    if score >= HIGH_PRIORITY_THRESHOLD {
        Priority::High
    } else if score >= MEDIUM_PRIORITY_THRESHOLD {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Effort multiplier for a section, higher for lower scores.
pub fn section_complexity_factor(current_score: f64) -> f64 {
    ((MAX_SCORE - current_score) / 2.0).clamp(0.5, 2.0)
}

pub fn estimate_implementation_effort(
    rec_type: RecommendationType,
    complexity_factor: f64,
) -> EffortEstimate {
    let (weeks, resources, complexity, risk) = match rec_type {
        RecommendationType::QuickWin => (2.0, 1.0, EffortLevel::Low, EffortLevel::Low),
        RecommendationType::Foundational => (8.0, 3.0, EffortLevel::Medium, EffortLevel::Medium),
        RecommendationType::Strategic => (16.0, 5.0, EffortLevel::High, EffortLevel::Medium),
        RecommendationType::Transformational => {
            (24.0, 8.0, EffortLevel::VeryHigh, EffortLevel::High)
        }
    };

    EffortEstimate {
        time_weeks: (weeks * complexity_factor) as u32,
        resources_needed: (resources * complexity_factor) as u32,
        complexity,
        risk,
        section_complexity_factor: complexity_factor,
    }
}

/// Composite ranking score; higher ranks first.
pub fn ranking_score(rec: &Recommendation) -> f64 {
    f64::from(rec.priority.weight()) * 0.4
        + f64::from(rec.impact.weight()) * 0.3
        + f64::from(rec.feasibility.weight()) * 0.2
        + rec.score_improvement * 0.1
}

/// Sort by descending ranking score. Ties keep their input order.
pub fn rank_recommendations(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    recommendations.sort_by(|a, b| ranking_score(b).total_cmp(&ranking_score(a)));
    recommendations
}

/// Drop recommendations whose text already appeared earlier in the list.
pub fn deduplicate(recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|rec| seen.insert(rec.text.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::types::Rating;
    use crate::scoring::MaturityLevel;

    fn recommendation(id: &str, priority: Priority, impact: Rating) -> Recommendation {
        Recommendation {
            id: id.to_string(),
            text: format!("Recommendation {}", id),
            section: "Foundational Capabilities".into(),
            section_key: "foundational_capabilities".into(),
            current_level: MaturityLevel::Assisted,
            target_level: MaturityLevel::Augmented,
            rec_type: RecommendationType::Foundational,
            priority,
            impact,
            feasibility: Rating::Medium,
            current_score: 2.0,
            target_score: 2.8,
            score_improvement: 0.8,
            effort_estimate: estimate_implementation_effort(RecommendationType::Foundational, 1.0),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_priority_thresholds() {
        // 3*0.4 + 3*0.4 + 1.0*0.2 = 2.6
        assert_eq!(
            calculate_recommendation_priority(Rating::High, Rating::High, 1.0, 1.0),
            Priority::High
        );
        // 2*0.4 + 2*0.4 + (2/3)*0.2 = 1.733
        assert_eq!(
            calculate_recommendation_priority(Rating::Medium, Rating::Medium, 2.0, 1.0),
            Priority::Medium
        );
        // 1*0.4 + 1*0.4 + 0 = 0.8
        assert_eq!(
            calculate_recommendation_priority(Rating::Low, Rating::Low, 4.0, 1.0),
            Priority::Low
        );
        assert_eq!(
            calculate_recommendation_priority(Rating::High, Rating::High, 1.0, 0.25),
            Priority::Low
        );
    }

    #[test]
    fn test_complexity_factor_is_clamped() {
        assert_eq!(section_complexity_factor(1.0), 1.5);
        assert_eq!(section_complexity_factor(3.5), 0.5);
        assert_eq!(section_complexity_factor(4.0), 0.5);
        assert_eq!(section_complexity_factor(2.0), 1.0);
    }

    #[test]
    fn test_effort_truncates() {
        let effort = estimate_implementation_effort(RecommendationType::Transformational, 1.5);
        assert_eq!(effort.time_weeks, 36);
        assert_eq!(effort.resources_needed, 12);
        assert_eq!(effort.complexity, EffortLevel::VeryHigh);

        let small = estimate_implementation_effort(RecommendationType::QuickWin, 0.5);
        assert_eq!(small.time_weeks, 1);
        assert_eq!(small.resources_needed, 0);
        assert_eq!(small.risk, EffortLevel::Low);
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let ranked = rank_recommendations(vec![
            recommendation("a", Priority::Low, Rating::Low),
            recommendation("b", Priority::High, Rating::Medium),
            recommendation("c", Priority::Medium, Rating::Medium),
            recommendation("d", Priority::High, Rating::Medium),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_deduplicate_keeps_first() {
        let mut twin = recommendation("b", Priority::Low, Rating::Low);
        twin.text = "Recommendation A".into();
        let unique = deduplicate(vec![recommendation("a", Priority::High, Rating::High), twin]);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].id, "a");
    }
}
