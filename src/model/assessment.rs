use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Error, Result};
use crate::scoring::MaturityLevel;

pub type AssessmentId = u64;

const MAX_TEAM_NAME_LEN: usize = 200;
const MAX_ORGANIZATION_LEN: usize = 200;

/// An answer on the 1-4 maturity scale.
///
/// The only way to obtain a `Score` is through validation, so every stored
/// response is in range by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::validation(format!(
                "Score {} is outside the {}-{} scale",
                value,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<i64> for Score {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    Draft,
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Draft => "DRAFT",
            AssessmentStatus::InProgress => "IN_PROGRESS",
            AssessmentStatus::Completed => "COMPLETED",
        }
    }

    /// Responses can no longer change once an assessment is completed.
    pub fn is_frozen(&self) -> bool {
        matches!(self, AssessmentStatus::Completed)
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored answer to one question within one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub assessment_id: AssessmentId,
    pub question_id: String,
    pub score: Score,
    #[serde(default)]
    pub notes: Option<String>,
    pub answered_at: DateTime<Utc>,
}

/// Organization and candidate details captured when an assessment starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub assessor_name: Option<String>,
    #[serde(default)]
    pub assessor_email: Option<String>,
}

impl AssessmentMetadata {
    /// Trim and normalize the metadata, rejecting oversized or malformed fields.
    pub fn validated(self) -> Result<Self> {
        let trimmed = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let metadata = Self {
            team_name: trimmed(self.team_name),
            organization: trimmed(self.organization),
            assessor_name: trimmed(self.assessor_name),
            assessor_email: trimmed(self.assessor_email).map(|e| e.to_lowercase()),
        };

        let mut errors = Vec::new();
        if let Some(name) = &metadata.team_name {
            if name.chars().count() > MAX_TEAM_NAME_LEN {
                errors.push(format!(
                    "Team name must be {} characters or less",
                    MAX_TEAM_NAME_LEN
                ));
            }
        }
        if let Some(org) = &metadata.organization {
            if org.chars().count() > MAX_ORGANIZATION_LEN {
                errors.push(format!(
                    "Organization must be {} characters or less",
                    MAX_ORGANIZATION_LEN
                ));
            }
        }
        if let Some(email) = &metadata.assessor_email {
            if !is_plausible_email(email) {
                errors.push(format!("Invalid assessor email '{}'", email));
            }
        }

        if errors.is_empty() {
            Ok(metadata)
        } else {
            Err(Error::validation(errors.join("; ")))
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && domain.contains('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// One questionnaire instance.
///
/// The cached score fields are only meaningful once `status` is `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub metadata: AssessmentMetadata,
    pub status: AssessmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub overall_score: Option<f64>,
    pub maturity_level: Option<MaturityLevel>,
    /// Frozen section scores keyed by section key
    pub section_scores: BTreeMap<String, f64>,
    /// Serialized finalized results
    pub results_json: Option<String>,
}

impl Assessment {
    pub fn new(id: AssessmentId, metadata: AssessmentMetadata, now: DateTime<Utc>) -> Self {
        Self {
            id,
            metadata,
            status: AssessmentStatus::Draft,
            created_at: now,
            updated_at: now,
            completed_at: None,
            overall_score: None,
            maturity_level: None,
            section_scores: BTreeMap::new(),
            results_json: None,
        }
    }

    pub fn display_name(&self) -> String {
        self.metadata
            .team_name
            .clone()
            .unwrap_or_else(|| format!("Assessment {}", self.id))
    }

    pub fn is_completed(&self) -> bool {
        self.status == AssessmentStatus::Completed
    }
}
