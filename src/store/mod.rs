//! Persistence seam for assessments and their responses.
//!
//! The scoring pipeline only needs to read responses scoped to one
//! assessment and write frozen results back, so the store trait stays small.

mod memory;

pub use memory::InMemoryStore;

use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::model::{Assessment, AssessmentId, AssessmentMetadata, Response};

/// Result of a finalize request.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    /// The assessment was completed by this request.
    Finalized(Assessment),
    /// Another request completed it first; the stored row is returned untouched.
    AlreadyCompleted(Assessment),
}

impl FinalizeOutcome {
    pub fn assessment(&self) -> &Assessment {
        match self {
            FinalizeOutcome::Finalized(a) | FinalizeOutcome::AlreadyCompleted(a) => a,
        }
    }

    pub fn into_assessment(self) -> Assessment {
        match self {
            FinalizeOutcome::Finalized(a) | FinalizeOutcome::AlreadyCompleted(a) => a,
        }
    }
}

/// Computes the completed row from the current row and its responses.
pub type Finalizer<'f> = dyn FnMut(&Assessment, &[Response]) -> Result<Assessment> + 'f;

pub trait AssessmentStore: Send + Sync {
    fn create_assessment(
        &self,
        metadata: AssessmentMetadata,
        now: DateTime<Utc>,
    ) -> Result<Assessment>;

    fn assessment(&self, id: AssessmentId) -> Result<Assessment>;

    fn assessment_ids(&self) -> Vec<AssessmentId>;

    /// Responses of one assessment in question-id order.
    fn responses(&self, id: AssessmentId) -> Result<Vec<Response>>;

    /// Insert or replace the response to a question. Fails once the
    /// assessment is completed; moves a draft assessment to in-progress.
    fn upsert_response(&self, response: Response) -> Result<Response>;

    /// Complete an assessment at most once. The finalizer runs while the
    /// store is locked for writing and is skipped when the assessment is
    /// already completed.
    fn finalize_with(&self, id: AssessmentId, finalizer: &mut Finalizer<'_>)
        -> Result<FinalizeOutcome>;
}
