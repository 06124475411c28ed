//! Completion tracking and the finalization gate.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::scoring::aggregate::round_to;

/// Answered share of the questionnaire, in percent.
pub fn completion_percentage(answered: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    answered as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionStatus {
    pub total_questions: usize,
    pub answered_questions: usize,
    pub unanswered_questions: usize,
    /// Percent, rounded to one decimal
    pub completion_percentage: f64,
    pub is_complete: bool,
    /// At or above the configured completion threshold
    pub is_substantial: bool,
}

impl CompletionStatus {
    pub fn new(answered: usize, total: usize, threshold: f64) -> Self {
        let answered = answered.min(total);
        let percentage = completion_percentage(answered, total);
        Self {
            total_questions: total,
            answered_questions: answered,
            unanswered_questions: total - answered,
            completion_percentage: round_to(percentage, 1),
            is_complete: total > 0 && percentage >= 100.0,
            is_substantial: total > 0 && percentage >= threshold,
        }
    }
}

/// Answer progress within one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub section_id: String,
    pub section_name: String,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub progress_percentage: f64,
    pub is_complete: bool,
}

impl SectionProgress {
    pub fn new(section_id: &str, section_name: &str, answered: usize, total: usize) -> Self {
        let percentage = completion_percentage(answered.min(total), total);
        Self {
            section_id: section_id.to_string(),
            section_name: section_name.to_string(),
            total_questions: total,
            answered_questions: answered.min(total),
            progress_percentage: round_to(percentage, 1),
            is_complete: total > 0 && answered >= total,
        }
    }
}

/// Decides whether an assessment may be finalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionGate {
    threshold: f64,
}

impl CompletionGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Without `force`, an assessment must have questions and meet the threshold.
    pub fn check(&self, answered: usize, total: usize, force: bool) -> Result<()> {
        if force {
            return Ok(());
        }
        if total == 0 {
            return Err(Error::assessment(
                "Cannot complete assessment with no questions",
            ));
        }

        let percentage = completion_percentage(answered, total);
        if percentage < self.threshold {
            return Err(Error::assessment(format!(
                "Assessment completion requires at least {}% of questions answered. \
                 Current: {:.1}% ({}/{})",
                self.threshold, percentage, answered, total
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COMPLETION_THRESHOLD;

    #[test]
    fn test_completion_status() {
        let status = CompletionStatus::new(2, 3, DEFAULT_COMPLETION_THRESHOLD);
        assert_eq!(status.completion_percentage, 66.7);
        assert_eq!(status.unanswered_questions, 1);
        assert!(!status.is_complete);
        assert!(!status.is_substantial);

        let full = CompletionStatus::new(24, 24, DEFAULT_COMPLETION_THRESHOLD);
        assert_eq!(full.completion_percentage, 100.0);
        assert!(full.is_complete);
        assert!(full.is_substantial);
    }

    #[test]
    fn test_empty_questionnaire_is_never_complete() {
        let status = CompletionStatus::new(0, 0, DEFAULT_COMPLETION_THRESHOLD);
        assert_eq!(status.completion_percentage, 0.0);
        assert!(!status.is_complete);
    }

    #[test]
    fn test_section_progress() {
        let progress = SectionProgress::new("S1", "Foundational Capabilities", 3, 6);
        assert_eq!(progress.progress_percentage, 50.0);
        assert!(!progress.is_complete);
        assert!(SectionProgress::new("S1", "x", 6, 6).is_complete);
    }

    #[test]
    fn test_gate_threshold() {
        let gate = CompletionGate::new(DEFAULT_COMPLETION_THRESHOLD);
        assert!(gate.check(8, 10, false).is_ok());
        let err = gate.check(5, 10, false).unwrap_err();
        assert!(matches!(err, Error::Assessment(_)));
        assert!(err.to_string().contains("50.0%"));
        assert!(gate.check(5, 10, true).is_ok());
    }

    #[test]
    fn test_gate_rejects_empty_questionnaire_without_force() {
        let gate = CompletionGate::new(DEFAULT_COMPLETION_THRESHOLD);
        assert!(gate.check(0, 0, false).is_err());
        assert!(gate.check(0, 0, true).is_ok());
    }
}
