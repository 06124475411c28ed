use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::errors::{Error, Result};
use crate::model::{Assessment, AssessmentId, AssessmentMetadata, AssessmentStatus, Response};

use super::{AssessmentStore, FinalizeOutcome, Finalizer};

#[derive(Debug, Default)]
struct StoreState {
    next_id: AssessmentId,
    assessments: BTreeMap<AssessmentId, Assessment>,
    /// Responses per assessment, keyed by question id
    responses: BTreeMap<AssessmentId, BTreeMap<String, Response>>,
}

impl StoreState {
    fn assessment_mut(&mut self, id: AssessmentId) -> Result<&mut Assessment> {
        self.assessments
            .get_mut(&id)
            .ok_or_else(|| Error::not_found("Assessment", id))
    }
}

/// Process-local store guarded by a single reader-writer lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssessmentStore for InMemoryStore {
    fn create_assessment(
        &self,
        metadata: AssessmentMetadata,
        now: DateTime<Utc>,
    ) -> Result<Assessment> {
        let mut state = self.state.write();
        state.next_id += 1;
        let assessment = Assessment::new(state.next_id, metadata, now);
        state.assessments.insert(assessment.id, assessment.clone());
        state.responses.insert(assessment.id, BTreeMap::new());
        Ok(assessment)
    }

    fn assessment(&self, id: AssessmentId) -> Result<Assessment> {
        self.state
            .read()
            .assessments
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("Assessment", id))
    }

    fn assessment_ids(&self) -> Vec<AssessmentId> {
        self.state.read().assessments.keys().copied().collect()
    }

    fn responses(&self, id: AssessmentId) -> Result<Vec<Response>> {
        let state = self.state.read();
        state
            .responses
            .get(&id)
            .map(|responses| responses.values().cloned().collect())
            .ok_or_else(|| Error::not_found("Assessment", id))
    }

    fn upsert_response(&self, response: Response) -> Result<Response> {
        let mut state = self.state.write();
        let assessment = state.assessment_mut(response.assessment_id)?;
        if assessment.status.is_frozen() {
            return Err(Error::assessment(format!(
                "Cannot modify responses for assessment {} with status {}",
                assessment.id, assessment.status
            )));
        }
        if assessment.status == AssessmentStatus::Draft {
            assessment.status = AssessmentStatus::InProgress;
        }
        assessment.updated_at = response.answered_at;

        state
            .responses
            .entry(response.assessment_id)
            .or_default()
            .insert(response.question_id.clone(), response.clone());
        Ok(response)
    }

    fn finalize_with(
        &self,
        id: AssessmentId,
        finalizer: &mut Finalizer<'_>,
    ) -> Result<FinalizeOutcome> {
        let mut state = self.state.write();
        let current = state
            .assessments
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("Assessment", id))?;
        if current.is_completed() {
            return Ok(FinalizeOutcome::AlreadyCompleted(current));
        }

        let responses: Vec<Response> = state
            .responses
            .get(&id)
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default();
        let mut completed = finalizer(&current, &responses)?;
        completed.status = AssessmentStatus::Completed;
        state.assessments.insert(id, completed.clone());
        Ok(FinalizeOutcome::Finalized(completed))
    }
}
