//! Report writers rendered into in-memory buffers.

mod common;

use common::{answers, metadata, question_ids, service};
use deviq::io::output::{JsonWriter, MarkdownWriter, OutputWriter, ReportView, TerminalWriter};
use deviq::recommendation::GenerationOptions;
use serde_json::Value;

fn render(writer: &mut dyn OutputWriter, view: &ReportView<'_>) {
    writer.write_report(view).unwrap();
}

#[test]
fn test_json_report_contains_scores_and_recommendations() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Json Team")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids, 2))
        .unwrap();
    let results = service.calculate_assessment_score(assessment.id).unwrap();
    let report = service
        .generate_recommendations(assessment.id, &GenerationOptions::default())
        .unwrap();

    let mut buffer = Vec::new();
    render(
        &mut JsonWriter::new(&mut buffer),
        &ReportView::full(&results, &report),
    );
    let json: Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(json["results"]["deviq_score"], 2.0);
    assert_eq!(json["results"]["maturity_level"], "Assisted");
    assert_eq!(json["results"]["assessment_name"], "Json Team");
    assert!(json["results"]["section_scores"]["enterprise_integration"].is_object());
    assert!(json["recommendations"]["recommendations"]["all"].is_array());
    assert!(json["recommendations"]["improvement_roadmap"]["target_state"].is_object());
}

#[test]
fn test_score_only_json_omits_recommendations() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Scores")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids, 3))
        .unwrap();
    let results = service.calculate_assessment_score(assessment.id).unwrap();

    let mut buffer = Vec::new();
    render(&mut JsonWriter::new(&mut buffer), &ReportView::scores(&results));
    let json: Value = serde_json::from_slice(&buffer).unwrap();
    assert!(json.get("recommendations").is_none());
}

#[test]
fn test_markdown_report_lists_sections_in_display_order() {
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Docs")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids, 3))
        .unwrap();
    let results = service.calculate_assessment_score(assessment.id).unwrap();
    let report = service
        .generate_recommendations(assessment.id, &GenerationOptions::default())
        .unwrap();

    let mut buffer = Vec::new();
    render(
        &mut MarkdownWriter::new(&mut buffer),
        &ReportView::full(&results, &report),
    );
    let markdown = String::from_utf8(buffer).unwrap();

    assert!(markdown.starts_with("# DevIQ Assessment: Docs"));
    assert!(markdown.contains("| DevIQ Score | 3.0 |"));
    assert!(markdown.contains("## Improvement Roadmap"));
    let foundational = markdown.find("| Foundational Capabilities |").unwrap();
    let governance = markdown.find("| Strategic Governance |").unwrap();
    assert!(foundational < governance);
}

#[test]
fn test_terminal_report_renders_plain_text() {
    colored::control::set_override(false);
    let service = service();
    let ids = question_ids(service.questionnaire());
    let assessment = service.create_assessment(metadata("Console")).unwrap();
    service
        .submit_responses(assessment.id, &answers(&ids, 1))
        .unwrap();
    let results = service.calculate_assessment_score(assessment.id).unwrap();

    let mut buffer = Vec::new();
    render(&mut TerminalWriter::new(&mut buffer), &ReportView::scores(&results));
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.contains("DevIQ Assessment Report"));
    assert!(text.contains("Traditional Development"));
    assert!(text.contains("Transformation Capabilities"));
}
