// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod model;
pub mod observability;
pub mod recommendation;
pub mod scoring;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use crate::config::{load_config, DeviqConfig};
pub use crate::errors::{Error, Result};

pub use crate::model::{
    Assessment, AssessmentId, AssessmentMetadata, AssessmentStatus, ProgressionCatalog,
    Questionnaire, Response, Score,
};

pub use crate::scoring::{
    classify_maturity_level, AssessmentResults, CompletionStatus, MaturityLevel, ScoreAggregator,
    ScoringEngine, SectionScore,
};

pub use crate::recommendation::{
    KeywordClassifier, Recommendation, RecommendationEngine, RecommendationReport,
    RecommendationTemplates, RecommendationType,
};

pub use crate::service::{AssessmentService, FinalizedAssessment, ResponseInput};
pub use crate::store::{AssessmentStore, InMemoryStore};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
