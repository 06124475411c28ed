//! Runs the deviq binary against fixture files in a temporary directory.

mod common;

use assert_cmd::prelude::*;
use common::{questionnaire, questionnaire_json, question_ids};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    questionnaire: PathBuf,
    responses: PathBuf,
}

/// Questionnaire plus a responses file answering the first `answered`
/// questions with `score`.
fn fixture(answered: usize, score: i64) -> Fixture {
    let dir = TempDir::new().unwrap();
    let questionnaire_path = dir.path().join("questionnaire.json");
    fs::write(&questionnaire_path, questionnaire_json().to_string()).unwrap();

    let ids = question_ids(&questionnaire());
    let responses: Vec<Value> = ids
        .iter()
        .take(answered)
        .map(|id| json!({ "question_id": id, "score": score }))
        .collect();
    let responses_path = dir.path().join("responses.json");
    fs::write(
        &responses_path,
        json!({
            "team_name": "CLI Team",
            "organization": "Acme",
            "responses": responses,
        })
        .to_string(),
    )
    .unwrap();

    Fixture {
        dir,
        questionnaire: questionnaire_path,
        responses: responses_path,
    }
}

fn deviq(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deviq"));
    cmd.current_dir(cwd).env_remove("RUST_LOG").env_remove("DEVIQ_CONFIG");
    cmd
}

#[test]
fn test_score_command_emits_json() {
    let f = fixture(common::TOTAL_QUESTIONS, 3);
    let output = deviq(f.dir.path())
        .arg("score")
        .arg(&f.questionnaire)
        .arg(&f.responses)
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["results"]["deviq_score"], 3.0);
    assert_eq!(json["results"]["maturity_level"], "Augmented");
    assert_eq!(json["results"]["assessment_name"], "CLI Team");
}

#[test]
fn test_finalize_requires_force_below_threshold() {
    let f = fixture(common::TOTAL_QUESTIONS / 2, 2);

    let refused = deviq(f.dir.path())
        .arg("finalize")
        .arg(&f.questionnaire)
        .arg(&f.responses)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&refused);
    assert!(stderr.contains("at least 80%"), "stderr: {}", stderr);

    let out = f.dir.path().join("reports/final.json");
    deviq(f.dir.path())
        .arg("finalize")
        .arg(&f.questionnaire)
        .arg(&f.responses)
        .args(["--force", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["results"]["completion_status"]["completion_percentage"], 50.0);
    assert!(json["recommendations"]["improvement_roadmap"].is_object());
}

#[test]
fn test_recommend_filters_types_into_markdown_file() {
    let f = fixture(common::TOTAL_QUESTIONS, 2);
    let out = f.dir.path().join("plan.md");

    deviq(f.dir.path())
        .arg("recommend")
        .arg(&f.questionnaire)
        .arg(&f.responses)
        .args(["--max", "2", "--types", "quick_win,foundational", "-f", "markdown", "-o"])
        .arg(&out)
        .assert()
        .success();

    let markdown = fs::read_to_string(&out).unwrap();
    assert!(markdown.starts_with("# DevIQ Assessment: CLI Team"));
    assert!(markdown.contains("## Improvement Roadmap"));
    assert!(!markdown.contains("| strategic |"));
    assert!(!markdown.contains("| transformational |"));
}

#[test]
fn test_unknown_recommendation_type_is_rejected() {
    let f = fixture(common::TOTAL_QUESTIONS, 2);
    deviq(f.dir.path())
        .arg("recommend")
        .arg(&f.questionnaire)
        .arg(&f.responses)
        .args(["--types", "moonshot"])
        .assert()
        .failure();
}

#[test]
fn test_out_of_range_response_fails() {
    let f = fixture(common::TOTAL_QUESTIONS, 5);
    let stderr = deviq(f.dir.path())
        .arg("score")
        .arg(&f.questionnaire)
        .arg(&f.responses)
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&stderr).contains("Validation error"));
}

#[test]
fn test_project_config_changes_completion_gate() {
    let f = fixture(common::TOTAL_QUESTIONS / 2, 3);
    fs::write(
        f.dir.path().join(".deviq.toml"),
        "[thresholds]\ncompletion_percentage = 50.0\n",
    )
    .unwrap();

    deviq(f.dir.path())
        .arg("finalize")
        .arg(&f.questionnaire)
        .arg(&f.responses)
        .args(["--format", "json"])
        .assert()
        .success();
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    deviq(dir.path()).arg("init").assert().success();

    let written = fs::read_to_string(dir.path().join(".deviq.toml")).unwrap();
    assert!(written.contains("[scoring]"));
    assert!(written.contains("completion_percentage = 80.0"));

    deviq(dir.path()).arg("init").assert().failure();
    deviq(dir.path()).args(["init", "--force"]).assert().success();
}
