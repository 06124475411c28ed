//! Domain model: the static questionnaire taxonomy, assessments with their
//! responses, and maturity progression reference data.

pub mod assessment;
pub mod progression;
pub mod taxonomy;

pub use assessment::{
    Assessment, AssessmentId, AssessmentMetadata, AssessmentStatus, Response, Score,
};
pub use progression::{ActionItemGroup, MaturityProgression, ProgressionCatalog, ProgressionGuidance};
pub use taxonomy::{Area, LevelDescription, Question, Questionnaire, Section};
