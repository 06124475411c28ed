use anyhow::Result;

use crate::cli::AssessmentArgs;
use crate::io::output::ReportView;

use super::{emit, load_assessment, GlobalOptions};

pub fn finalize_assessment(globals: &GlobalOptions, args: &AssessmentArgs, force: bool) -> Result<()> {
    let loaded = load_assessment(globals, args)?;
    let finalized = loaded.service.finalize(loaded.assessment_id, force)?;
    emit(
        args,
        &ReportView::full(&finalized.results, &finalized.recommendations),
    )
}
