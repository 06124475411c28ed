//! CLI command implementations.
//!
//! - **score**: score an assessment from a questionnaire and responses file
//! - **finalize**: gate on completion, then freeze results and recommendations
//! - **recommend**: ranked recommendations and the improvement roadmap
//! - **init**: write a default `.deviq.toml`

pub mod finalize;
pub mod init;
pub mod recommend;
pub mod score;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::AssessmentArgs;
use crate::config::{load_config, DeviqConfig};
use crate::io::output::{create_writer, ReportView};
use crate::model::{AssessmentId, AssessmentMetadata, ProgressionCatalog, Questionnaire};
use crate::recommendation::RecommendationTemplates;
use crate::service::{AssessmentService, ResponseInput};
use crate::store::InMemoryStore;

/// Options that apply to every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub templates: Option<PathBuf>,
}

/// Responses file: team metadata next to the list of answers.
#[derive(Debug, Deserialize)]
pub struct ResponsesFile {
    #[serde(flatten)]
    pub metadata: AssessmentMetadata,
    pub responses: Vec<ResponseInput>,
}

/// A service holding one assessment built from the command's input files.
pub struct LoadedAssessment {
    pub service: AssessmentService<InMemoryStore>,
    pub assessment_id: AssessmentId,
}

pub fn load_assessment(globals: &GlobalOptions, args: &AssessmentArgs) -> Result<LoadedAssessment> {
    let config = load_config(globals.config.as_deref())?;
    let templates = load_templates(globals, &config)?;
    let questionnaire = Questionnaire::from_json_file(&args.questionnaire)
        .with_context(|| format!("Failed to load questionnaire {}", args.questionnaire.display()))?;
    let progressions = match &args.progressions {
        Some(path) => ProgressionCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load progressions {}", path.display()))?,
        None => ProgressionCatalog::default(),
    };
    let input: ResponsesFile = crate::io::read_json(&args.responses)?;

    let service = AssessmentService::new(InMemoryStore::new(), questionnaire, config)
        .with_templates(templates)
        .with_progressions(progressions);
    let assessment = service.create_assessment(input.metadata)?;
    service.submit_responses(assessment.id, &input.responses)?;

    Ok(LoadedAssessment {
        service,
        assessment_id: assessment.id,
    })
}

fn load_templates(globals: &GlobalOptions, config: &DeviqConfig) -> Result<RecommendationTemplates> {
    let path = globals
        .templates
        .as_deref()
        .or(config.recommendations.templates_path.as_deref());
    Ok(RecommendationTemplates::load(path)?)
}

/// Render a report to the requested file, or stdout.
pub fn emit(args: &AssessmentArgs, view: &ReportView<'_>) -> Result<()> {
    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(create_output(path)?)),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = create_writer(args.format.into(), sink);
    writer.write_report(view)?;
    Ok(())
}

fn create_output(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::io::ensure_dir(parent)?;
    }
    File::create(path).with_context(|| format!("Failed to create {}", path.display()))
}
