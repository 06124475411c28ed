//! End-to-end assessment lifecycle through the service layer.

mod common;

use common::{answers, metadata, question_ids, service, TOTAL_QUESTIONS};
use deviq::model::AssessmentStatus;
use deviq::scoring::MaturityLevel;
use deviq::service::ResponseInput;
use deviq::Error;
use pretty_assertions::assert_eq;

#[test]
fn test_full_assessment_scores_augmented_and_finalizes() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    assert_eq!(ids.len(), TOTAL_QUESTIONS);

    let assessment = service.create_assessment(metadata("Platform")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids, 3))
        .unwrap();

    let results = service.calculate_assessment_score(assessment.id).unwrap();
    assert_eq!(results.deviq_score, 3.0);
    assert_eq!(results.maturity_level, MaturityLevel::Augmented);
    assert_eq!(results.completion_status.completion_percentage, 100.0);
    assert!(results.completion_status.is_complete);
    assert_eq!(results.section_scores.len(), 4);
    assert!(results.section_scores.values().all(|s| s.score == 3.0));
    assert_eq!(results.assessment_name, "Platform");

    let finalized = service.finalize(assessment.id, false).unwrap();
    assert_eq!(finalized.results.deviq_score, 3.0);
    assert!(finalized.recommendations.total_recommendations > 0);

    let stored = service.assessment(assessment.id).unwrap();
    assert_eq!(stored.status, AssessmentStatus::Completed);
    assert_eq!(stored.overall_score, Some(3.0));
    assert_eq!(stored.maturity_level, Some(MaturityLevel::Augmented));
    assert!(stored.completed_at.is_some());
    assert!(stored.results_json.is_some());
}

#[test]
fn test_second_finalize_returns_frozen_results() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Data")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids, 3))
        .unwrap();

    let first = service.finalize(assessment.id, false).unwrap();
    let second = service.finalize(assessment.id, true).unwrap();
    assert_eq!(first, second);

    let frozen = service.finalized_results(assessment.id).unwrap();
    assert_eq!(frozen, Some(first));
}

#[test]
fn test_completed_assessment_rejects_new_responses() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Infra")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids, 2))
        .unwrap();
    service.finalize(assessment.id, false).unwrap();

    let result = service.submit_response(
        assessment.id,
        &ResponseInput {
            question_id: ids[0].clone(),
            score: 4,
            notes: None,
        },
    );
    assert!(matches!(result, Err(Error::Assessment(_))));
}

#[test]
fn test_half_answered_assessment_needs_force() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let half = &ids[..TOTAL_QUESTIONS / 2];
    let assessment = service.create_assessment(metadata("Mobile")).unwrap();
    service
        .submit_responses(assessment.id, &answers(half, 3))
        .unwrap();

    let progress = service.progress(assessment.id).unwrap();
    assert_eq!(progress.completion.completion_percentage, 50.0);
    assert!(!progress.completion.is_substantial);
    assert_eq!(progress.status, AssessmentStatus::InProgress);

    let refused = service.finalize(assessment.id, false);
    match refused {
        Err(Error::Assessment(message)) => {
            assert!(message.contains("80"), "unexpected message: {}", message);
            assert!(message.contains("50.0%"), "unexpected message: {}", message);
        }
        other => panic!("expected completion error, got {:?}", other),
    }
    assert_eq!(
        service.assessment(assessment.id).unwrap().status,
        AssessmentStatus::InProgress
    );

    let forced = service.finalize(assessment.id, true).unwrap();
    assert_eq!(forced.results.completion_status.completion_percentage, 50.0);

    // Answered sections average their answers only; unanswered ones sit at 1.0.
    let sections = &forced.results.section_scores;
    assert_eq!(sections["foundational_capabilities"].score, 3.0);
    assert_eq!(sections["transformation_capabilities"].score, 3.0);
    assert_eq!(sections["enterprise_integration"].score, 1.0);
    assert_eq!(sections["enterprise_integration"].coverage, 0.0);
    assert_eq!(sections["strategic_governance"].score, 1.0);
    assert_eq!(forced.results.deviq_score, 2.0);
    assert_eq!(forced.results.maturity_level, MaturityLevel::Assisted);
    assert_eq!(
        service.assessment(assessment.id).unwrap().overall_score,
        Some(2.0)
    );
}

#[test]
fn test_unanswered_sections_score_minimum_with_zero_coverage() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Web")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids[..TOTAL_QUESTIONS / 2], 3))
        .unwrap();

    let results = service.calculate_assessment_score(assessment.id).unwrap();
    let governance = &results.section_scores["strategic_governance"];
    assert_eq!(governance.score, 1.0);
    assert_eq!(governance.coverage, 0.0);
    assert_eq!(governance.responses_count, 0);

    // Two sections at 3.0 and two at 1.0, equally weighted.
    assert_eq!(results.deviq_score, 2.0);
    assert_eq!(results.maturity_level, MaturityLevel::Assisted);
}

#[test]
fn test_invalid_batch_stores_nothing() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Ops")).unwrap();

    let mut batch = answers(&ids[..3], 2);
    batch.push(ResponseInput {
        question_id: ids[3].clone(),
        score: 5,
        notes: None,
    });
    batch.push(ResponseInput {
        question_id: "missing".to_string(),
        score: 2,
        notes: None,
    });

    let err = service.submit_responses(assessment.id, &batch).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Response 4"), "{}", message);
    assert!(message.contains("Response 5"), "{}", message);

    let progress = service.progress(assessment.id).unwrap();
    assert_eq!(progress.completion.answered_questions, 0);
    assert_eq!(progress.status, AssessmentStatus::Draft);
}

#[test]
fn test_resubmitting_a_question_replaces_the_answer() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Core")).unwrap();

    for score in [1, 4] {
        service
            .submit_response(
                assessment.id,
                &ResponseInput {
                    question_id: ids[0].clone(),
                    score,
                    notes: Some("  revisited  ".to_string()),
                },
            )
            .unwrap();
    }

    let progress = service.progress(assessment.id).unwrap();
    assert_eq!(progress.completion.answered_questions, 1);

    let stored = service.store();
    let responses = deviq::store::AssessmentStore::responses(stored, assessment.id).unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].score.value(), 4);
    assert_eq!(responses[0].notes.as_deref(), Some("revisited"));
}

#[test]
fn test_next_question_follows_display_order() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Search")).unwrap();

    let first = service.next_question(assessment.id).unwrap().unwrap();
    assert_eq!(first.id, ids[0]);

    service
        .submit_responses(assessment.id, &answers(&ids[..2], 2))
        .unwrap();
    let next = service.next_question(assessment.id).unwrap().unwrap();
    assert_eq!(next.id, ids[2]);

    service
        .submit_responses(assessment.id, &answers(&ids, 2))
        .unwrap();
    assert!(service.next_question(assessment.id).unwrap().is_none());
}

#[test]
fn test_unknown_assessment_is_not_found() {
    let service = service();
    let err = service.calculate_assessment_score(42).unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "Assessment", .. }));
}

#[test]
fn test_score_trends_skip_unknown_assessments() {
    let service = service();
    let ids = question_ids(service.questionnaire());

    let early = service.create_assessment(metadata("Team")).unwrap();
    service
        .submit_responses(early.id, &answers(&ids, 2))
        .unwrap();
    let later = service.create_assessment(metadata("Team")).unwrap();
    service
        .submit_responses(later.id, &answers(&ids, 3))
        .unwrap();

    let trends = service.score_trends(&[early.id, 999, later.id]);
    assert_eq!(trends.assessment_ids, vec![early.id, later.id]);
    assert_eq!(trends.deviq_scores, vec![2.0, 3.0]);
    assert_eq!(trends.overall_change(), Some(1.0));
}
