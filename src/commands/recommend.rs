use anyhow::Result;

use crate::cli::AssessmentArgs;
use crate::io::output::ReportView;
use crate::recommendation::{GenerationOptions, RecommendationType};

use super::{emit, load_assessment, GlobalOptions};

pub fn recommend(
    globals: &GlobalOptions,
    args: &AssessmentArgs,
    max: Option<usize>,
    types: Option<Vec<RecommendationType>>,
) -> Result<()> {
    let loaded = load_assessment(globals, args)?;
    let results = loaded
        .service
        .calculate_assessment_score(loaded.assessment_id)?;
    let options = GenerationOptions {
        max_recommendations: max,
        include_types: types,
    };
    let report = loaded
        .service
        .generate_recommendations(loaded.assessment_id, &options)?;
    emit(args, &ReportView::full(&results, &report))
}
