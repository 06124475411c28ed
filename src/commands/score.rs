use anyhow::Result;

use crate::cli::AssessmentArgs;
use crate::io::output::ReportView;

use super::{emit, load_assessment, GlobalOptions};

pub fn score_assessment(globals: &GlobalOptions, args: &AssessmentArgs) -> Result<()> {
    let loaded = load_assessment(globals, args)?;
    let results = loaded
        .service
        .calculate_assessment_score(loaded.assessment_id)?;
    emit(args, &ReportView::scores(&results))
}
