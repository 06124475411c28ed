//! Error types for assessment scoring and recommendation operations.
//!
//! Two kinds of failure exist in this crate and they are kept apart:
//!
//! - **Errors** are caller mistakes: an answer outside the 1-4 scale, an unknown
//!   question, mismatched weights, finalizing below the completion threshold, or
//!   editing an assessment that is already frozen. These surface as [`Error`].
//! - **Data states** are legitimate gaps in the data: an area nobody answered, a
//!   level transition with no guidance, a missing template file. These resolve to
//!   documented defaults (`MIN_SCORE` with zero coverage, an empty list, the
//!   built-in templates) and never produce an [`Error`].
//!
//! # Error Codes
//!
//! - E001-E009: I/O and filesystem errors
//! - E010-E019: Parse errors (JSON, TOML)
//! - E020-E029: Configuration errors
//! - E030-E039: Assessment lifecycle errors
//! - E050-E059: Validation errors

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E001");
    /// Parse error - malformed JSON
    pub const PARSE_JSON: ErrorCode = ErrorCode("E010");
    /// Parse error - malformed TOML
    pub const PARSE_TOML: ErrorCode = ErrorCode("E011");
    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Config error - recommendation templates unusable
    pub const CONFIG_TEMPLATES: ErrorCode = ErrorCode("E021");
    /// Assessment error - business rule violated
    pub const ASSESSMENT_RULE: ErrorCode = ErrorCode("E030");
    /// Assessment error - entity not found
    pub const ASSESSMENT_NOT_FOUND: ErrorCode = ErrorCode("E031");
    /// Validation error - generic
    pub const VALIDATION_GENERIC: ErrorCode = ErrorCode("E050");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for deviq operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input (scores, weights, metadata)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation in the assessment lifecycle
    #[error("Assessment error: {0}")]
    Assessment(String),

    /// Referenced assessment, question or section does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Recommendation template file exists but cannot be used
    #[error("Template error in {}: {message}", path.display())]
    Template { path: PathBuf, message: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn assessment(message: impl Into<String>) -> Self {
        Self::Assessment(message.into())
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Get the structured error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::VALIDATION_GENERIC,
            Self::Assessment(_) => ErrorCode::ASSESSMENT_RULE,
            Self::NotFound { .. } => ErrorCode::ASSESSMENT_NOT_FOUND,
            Self::Configuration(_) => ErrorCode::CONFIG_INVALID,
            Self::Template { .. } => ErrorCode::CONFIG_TEMPLATES,
            Self::WithContext { .. } => ErrorCode::ASSESSMENT_RULE,
            Self::Io(_) => ErrorCode::IO_GENERIC,
            Self::Json(_) => ErrorCode::PARSE_JSON,
            Self::Toml(_) => ErrorCode::PARSE_TOML,
        }
    }

    /// Whether the person driving the assessment can fix this by changing input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Assessment(_)
                | Self::Configuration(_)
                | Self::Template { .. }
                | Self::Json(_)
                | Self::Toml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_by_category() {
        assert_eq!(Error::validation("x").code(), ErrorCode::VALIDATION_GENERIC);
        assert_eq!(Error::assessment("x").code().as_str(), "E030");
        assert_eq!(Error::not_found("Assessment", 7).code().as_str(), "E031");
        assert_eq!(Error::configuration("x").code().to_string(), "E020");
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("Question", "FC-01");
        assert_eq!(err.to_string(), "Question not found: FC-01");
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::validation("score 7 outside 1-4"));
        let err = result.context("submitting response").unwrap_err();
        assert_eq!(
            err.to_string(),
            "submitting response: Validation error: score 7 outside 1-4"
        );
    }

    #[test]
    fn test_user_fixable_classification() {
        assert!(Error::validation("bad").is_user_fixable());
        assert!(Error::assessment("incomplete").is_user_fixable());
        let io = Error::from(std::io::Error::other("disk"));
        assert!(!io.is_user_fixable());
    }
}
