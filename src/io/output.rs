use colored::*;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

use crate::recommendation::{Recommendation, RecommendationReport};
use crate::scoring::{in_display_order, section_benchmark, AssessmentResults, MaturityLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

/// What a command hands to a writer: scores, plus recommendations when
/// they were generated.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportView<'a> {
    pub results: &'a AssessmentResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<&'a RecommendationReport>,
}

impl<'a> ReportView<'a> {
    pub fn scores(results: &'a AssessmentResults) -> Self {
        Self {
            results,
            recommendations: None,
        }
    }

    pub fn full(results: &'a AssessmentResults, recommendations: &'a RecommendationReport) -> Self {
        Self {
            results,
            recommendations: Some(recommendations),
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ReportView<'_>) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ReportView<'_>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ReportView<'_>) -> anyhow::Result<()> {
        self.write_header(report.results)?;
        self.write_sections(report.results)?;
        if let Some(recommendations) = report.recommendations {
            self.write_recommendations(recommendations)?;
            self.write_roadmap(recommendations)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, results: &AssessmentResults) -> anyhow::Result<()> {
        let completion = &results.completion_status;
        writeln!(self.writer, "# DevIQ Assessment: {}", results.assessment_name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| DevIQ Score | {} |", results.deviq_score_display)?;
        writeln!(
            self.writer,
            "| Maturity Level | {} |",
            results.maturity_level_display
        )?;
        writeln!(
            self.writer,
            "| Completion | {:.1}% ({}/{}) |",
            completion.completion_percentage,
            completion.answered_questions,
            completion.total_questions
        )?;
        let potential = &results.improvement_potential;
        if potential.is_achievable {
            writeln!(
                self.writer,
                "| Gap to {} | {:.2} |",
                potential.target_level.label(),
                potential.gap_to_target
            )?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "> {}", results.maturity_details.description)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_sections(&mut self, results: &AssessmentResults) -> anyhow::Result<()> {
        writeln!(self.writer, "## Section Scores")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Section | Score | Level | Coverage | Industry Avg |"
        )?;
        writeln!(
            self.writer,
            "|---------|-------|-------|----------|--------------|"
        )?;
        for (key, section) in in_display_order(&results.section_scores) {
            writeln!(
                self.writer,
                "| {} | {} | {} | {:.0}% | {:.1} |",
                section.section_name,
                section.score_display,
                section.maturity_level,
                section.coverage * 100.0,
                section_benchmark(key).industry_average
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, report: &RecommendationReport) -> anyhow::Result<()> {
        if report.recommendations.all.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer,
            "## Recommendations ({})",
            report.total_recommendations
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | Recommendation | Section | Type | Priority | Effort |")?;
        writeln!(self.writer, "|---|----------------|---------|------|----------|--------|")?;
        for (i, rec) in report.recommendations.all.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} weeks |",
                i + 1,
                rec.text,
                rec.section,
                rec.rec_type,
                rec.priority,
                rec.effort_estimate.time_weeks
            )?;
        }
        let effort = &report.recommendations.summary.estimated_effort;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Estimated effort: {} weeks, {} people",
            effort.time_weeks, effort.resources_needed
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_roadmap(&mut self, report: &RecommendationReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Improvement Roadmap")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "```text")?;
        write!(self.writer, "{}", report.improvement_roadmap.render_plan())?;
        writeln!(self.writer, "```")?;
        Ok(())
    }
}

/// Colored console report with tables for sections and recommendations.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ReportView<'_>) -> anyhow::Result<()> {
        let results = report.results;
        writeln!(self.writer, "{}", "DevIQ Assessment Report".bold().blue())?;
        writeln!(self.writer, "{}", "=======================".blue())?;
        writeln!(self.writer, "  Assessment: {}", results.assessment_name)?;
        writeln!(
            self.writer,
            "  DevIQ score: {} ({})",
            by_level(&results.deviq_score_display, results.maturity_level),
            by_level(results.maturity_level.display_name(), results.maturity_level)
        )?;
        writeln!(
            self.writer,
            "  Completion: {:.1}%",
            results.completion_status.completion_percentage
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", section_table(results))?;

        if let Some(recommendations) = report.recommendations {
            if !recommendations.recommendations.all.is_empty() {
                writeln!(self.writer)?;
                writeln!(self.writer, "{}", "Top recommendations".bold())?;
                writeln!(
                    self.writer,
                    "{}",
                    recommendation_table(&recommendations.recommendations.all)
                )?;
            }
            writeln!(self.writer)?;
            write!(
                self.writer,
                "{}",
                recommendations.improvement_roadmap.render_plan()
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn by_level(text: &str, level: MaturityLevel) -> ColoredString {
    match level {
        MaturityLevel::First => text.green().bold(),
        MaturityLevel::Augmented => text.green(),
        MaturityLevel::Assisted => text.yellow(),
        MaturityLevel::Traditional => text.red(),
    }
}

fn section_table(results: &AssessmentResults) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Section", "Score", "Level", "Coverage", "Benchmark"]);
    for (key, section) in in_display_order(&results.section_scores) {
        let benchmark = section_benchmark(key);
        table.add_row(vec![
            section.section_name.clone(),
            section.score_display.clone(),
            section.maturity_level.to_string(),
            format!("{:.0}%", section.coverage * 100.0),
            benchmark.position(section.score).label().to_string(),
        ]);
    }
    table
}

fn recommendation_table(recommendations: &[Recommendation]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Recommendation", "Section", "Type", "Priority", "Weeks"]);
    for rec in recommendations.iter().take(10) {
        table.add_row(vec![
            rec.text.clone(),
            rec.section.clone(),
            rec.rec_type.to_string(),
            rec.priority.to_string(),
            rec.effort_estimate.time_weeks.to_string(),
        ]);
    }
    table
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
