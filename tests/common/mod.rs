// Shared fixtures for deviq integration tests
#![allow(dead_code)]

use deviq::model::{AssessmentMetadata, Questionnaire};
use deviq::service::{AssessmentService, ResponseInput};
use deviq::store::InMemoryStore;
use deviq::DeviqConfig;
use serde_json::{json, Value};

pub const SECTION_NAMES: [&str; 4] = [
    "Foundational Capabilities",
    "Transformation Capabilities",
    "Enterprise Integration",
    "Strategic Governance",
];

pub const AREAS_PER_SECTION: usize = 2;
pub const QUESTIONS_PER_AREA: usize = 3;
pub const TOTAL_QUESTIONS: usize = SECTION_NAMES.len() * AREAS_PER_SECTION * QUESTIONS_PER_AREA;

/// Four standard sections, two areas each, three questions per area.
pub fn questionnaire_json() -> Value {
    let mut sections = Vec::new();
    let mut areas = Vec::new();
    let mut questions = Vec::new();

    for (s, name) in SECTION_NAMES.iter().enumerate() {
        let section_id = format!("S{}", s + 1);
        sections.push(json!({
            "id": section_id,
            "name": name,
            "display_order": s + 1,
        }));
        for a in 0..AREAS_PER_SECTION {
            let area_id = format!("{}-A{}", section_id, a + 1);
            areas.push(json!({
                "id": area_id,
                "section_id": section_id,
                "name": format!("{} Area {}", name, a + 1),
                "display_order": a + 1,
                "timeline_l1_l2": "1-2 months",
                "timeline_l2_l3": "2-4 months",
                "timeline_l3_l4": "4-6 months",
            }));
            for q in 0..QUESTIONS_PER_AREA {
                questions.push(json!({
                    "id": format!("{}-Q{}", area_id, q + 1),
                    "area_id": area_id,
                    "question": format!("How mature is practice {} of {}?", q + 1, area_id),
                    "display_order": q + 1,
                    "level_1_desc": "Ad hoc",
                    "level_4_desc": "Fully embedded",
                }));
            }
        }
    }

    json!({ "sections": sections, "areas": areas, "questions": questions })
}

pub fn questionnaire() -> Questionnaire {
    Questionnaire::from_json_str(&questionnaire_json().to_string()).unwrap()
}

pub fn question_ids(questionnaire: &Questionnaire) -> Vec<String> {
    questionnaire
        .ordered_questions()
        .map(|q| q.id.clone())
        .collect()
}

pub fn answers(ids: &[String], score: i64) -> Vec<ResponseInput> {
    ids.iter()
        .map(|id| ResponseInput {
            question_id: id.clone(),
            score,
            notes: None,
        })
        .collect()
}

pub fn service() -> AssessmentService<InMemoryStore> {
    AssessmentService::new(InMemoryStore::new(), questionnaire(), DeviqConfig::default())
}

pub fn metadata(team: &str) -> AssessmentMetadata {
    AssessmentMetadata {
        team_name: Some(team.to_string()),
        organization: Some("Acme".to_string()),
        ..AssessmentMetadata::default()
    }
}
