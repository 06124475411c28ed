use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;
use crate::scoring::MaturityLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    QuickWin,
    Foundational,
    Strategic,
    Transformational,
}

impl RecommendationType {
    pub const ALL: [RecommendationType; 4] = [
        RecommendationType::QuickWin,
        RecommendationType::Foundational,
        RecommendationType::Strategic,
        RecommendationType::Transformational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::QuickWin => "quick_win",
            RecommendationType::Foundational => "foundational",
            RecommendationType::Strategic => "strategic",
            RecommendationType::Transformational => "transformational",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| Error::validation(format!("Unknown recommendation type '{}'", s)))
    }
}

/// Three-step rating used for both impact and feasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Low,
    Medium,
    High,
}

pub type ImpactLevel = Rating;
pub type FeasibilityLevel = Rating;

impl Rating {
    pub fn weight(self) -> u8 {
        match self {
            Rating::High => 3,
            Rating::Medium => 2,
            Rating::Low => 1,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rating::High => "high",
            Rating::Medium => "medium",
            Rating::Low => "low",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(Error::validation(format!("Unknown priority '{}'", other))),
        }
    }
}

/// Qualitative size of an effort estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffortLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EffortLevel::Low => "Low",
            EffortLevel::Medium => "Medium",
            EffortLevel::High => "High",
            EffortLevel::VeryHigh => "Very High",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortEstimate {
    pub time_weeks: u32,
    pub resources_needed: u32,
    pub complexity: EffortLevel,
    pub risk: EffortLevel,
    pub section_complexity_factor: f64,
}

/// A template text with the metadata derived for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub text: String,
    pub section: String,
    pub section_key: String,
    pub current_level: MaturityLevel,
    pub target_level: MaturityLevel,
    #[serde(rename = "type")]
    pub rec_type: RecommendationType,
    pub priority: Priority,
    pub impact: ImpactLevel,
    pub feasibility: FeasibilityLevel,
    pub current_score: f64,
    pub target_score: f64,
    pub score_improvement: f64,
    pub effort_estimate: EffortEstimate,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parsing() {
        assert_eq!(
            "quick_win".parse::<RecommendationType>().unwrap(),
            RecommendationType::QuickWin
        );
        assert!("moonshot".parse::<RecommendationType>().is_err());
        assert_eq!(
            serde_json::to_string(&RecommendationType::Transformational).unwrap(),
            "\"transformational\""
        );
    }

    #[test]
    fn test_effort_level_serializes_with_space() {
        assert_eq!(
            serde_json::to_string(&EffortLevel::VeryHigh).unwrap(),
            "\"Very High\""
        );
        assert_eq!(EffortLevel::VeryHigh.to_string(), "Very High");
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
