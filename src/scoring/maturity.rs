//! Maturity bands and the classifier that maps a score onto them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{MaturityThresholds, MAX_SCORE, MIN_SCORE};
use crate::errors::{Error, Result};

/// The four ordered maturity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaturityLevel {
    Traditional,
    Assisted,
    Augmented,
    First,
}

/// Descriptive text shown next to a maturity level in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityDetails {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub characteristics: Vec<String>,
}

impl MaturityLevel {
    pub const ALL: [MaturityLevel; 4] = [
        MaturityLevel::Traditional,
        MaturityLevel::Assisted,
        MaturityLevel::Augmented,
        MaturityLevel::First,
    ];

    /// Position on the 1-4 ladder.
    pub fn number(self) -> u8 {
        match self {
            MaturityLevel::Traditional => 1,
            MaturityLevel::Assisted => 2,
            MaturityLevel::Augmented => 3,
            MaturityLevel::First => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(MaturityLevel::Traditional),
            2 => Some(MaturityLevel::Assisted),
            3 => Some(MaturityLevel::Augmented),
            4 => Some(MaturityLevel::First),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaturityLevel::Traditional => "Traditional",
            MaturityLevel::Assisted => "Assisted",
            MaturityLevel::Augmented => "Augmented",
            MaturityLevel::First => "First",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MaturityLevel::Traditional => "Traditional Development",
            MaturityLevel::Assisted => "AI-Assisted Development",
            MaturityLevel::Augmented => "AI-Augmented Development",
            MaturityLevel::First => "AI-First Development",
        }
    }

    /// The next rung up, or `None` at the top.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn details(self) -> MaturityDetails {
        let (short_name, description, characteristics): (&str, &str, &[&str]) = match self {
            MaturityLevel::Traditional => (
                "Basic",
                "Manual development processes with minimal AI integration",
                &[
                    "Manual coding practices",
                    "Traditional testing approaches",
                    "Limited automation",
                    "Basic tooling",
                ],
            ),
            MaturityLevel::Assisted => (
                "Developing",
                "Individual developers using AI tools for basic assistance",
                &[
                    "AI code completion",
                    "Basic AI tool adoption",
                    "Individual experimentation",
                    "Ad-hoc AI usage",
                ],
            ),
            MaturityLevel::Augmented => (
                "Advanced",
                "Systematic AI integration across development workflows",
                &[
                    "Team-wide AI adoption",
                    "AI-enhanced processes",
                    "Systematic integration",
                    "Measured AI impact",
                ],
            ),
            MaturityLevel::First => (
                "Optimized",
                "AI-native development with autonomous capabilities",
                &[
                    "AI-driven architecture",
                    "Autonomous development",
                    "Enterprise AI governance",
                    "Continuous AI innovation",
                ],
            ),
        };

        MaturityDetails {
            name: self.display_name().to_string(),
            short_name: short_name.to_string(),
            description: description.to_string(),
            characteristics: characteristics.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl MaturityThresholds {
    /// Map a score onto its band, checking the highest band first so a score
    /// sitting exactly on a bound lands in the higher band.
    pub fn classify(&self, score: f64) -> Result<MaturityLevel> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(Error::validation(format!(
                "Score {} is outside the {:.1}-{:.1} range",
                score, MIN_SCORE, MAX_SCORE
            )));
        }

        let level = if score >= self.first {
            MaturityLevel::First
        } else if score >= self.augmented {
            MaturityLevel::Augmented
        } else if score >= self.assisted {
            MaturityLevel::Assisted
        } else {
            MaturityLevel::Traditional
        };
        Ok(level)
    }

    /// Inclusive lower and upper score of a band.
    pub fn band(&self, level: MaturityLevel) -> (f64, f64) {
        match level {
            MaturityLevel::Traditional => (MIN_SCORE, self.assisted),
            MaturityLevel::Assisted => (self.assisted, self.augmented),
            MaturityLevel::Augmented => (self.augmented, self.first),
            MaturityLevel::First => (self.first, MAX_SCORE),
        }
    }
}

/// Classify against the default bands.
pub fn classify_maturity_level(score: f64) -> Result<MaturityLevel> {
    MaturityThresholds::default().classify(score)
}

/// Distance from the current score to the next (or a chosen) maturity level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementPotential {
    pub current_score: f64,
    pub current_level: MaturityLevel,
    pub target_level: MaturityLevel,
    pub target_min_score: f64,
    pub target_max_score: f64,
    pub gap_to_target: f64,
    pub potential_improvement: f64,
    pub is_achievable: bool,
}

pub fn calculate_improvement_potential(
    current_score: f64,
    target: Option<MaturityLevel>,
    thresholds: &MaturityThresholds,
) -> Result<ImprovementPotential> {
    let current_level = thresholds.classify(current_score)?;
    let target_level = target
        .or_else(|| current_level.next())
        .unwrap_or(MaturityLevel::First);
    let (target_min_score, target_max_score) = thresholds.band(target_level);

    Ok(ImprovementPotential {
        current_score,
        current_level,
        target_level,
        target_min_score,
        target_max_score,
        gap_to_target: (target_min_score - current_score).max(0.0),
        potential_improvement: target_max_score - current_score,
        is_achievable: target_level > current_level,
    })
}
