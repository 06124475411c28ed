use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::recommendation::RecommendationType;

#[derive(Parser, Debug)]
#[command(name = "deviq")]
#[command(about = "Score maturity assessments and plan improvements", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the nearest .deviq.toml)
    #[arg(long, global = true, env = "DEVIQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Recommendation templates JSON (overrides the configured path)
    #[arg(long, global = true)]
    pub templates: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

/// Inputs shared by every command that scores an assessment.
#[derive(Args, Debug, Clone)]
pub struct AssessmentArgs {
    /// Questionnaire JSON with sections, areas and questions
    pub questionnaire: PathBuf,

    /// Responses JSON with optional team metadata
    pub responses: PathBuf,

    /// Maturity progression guidance JSON
    #[arg(long)]
    pub progressions: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an assessment without completing it
    Score {
        #[command(flatten)]
        args: AssessmentArgs,
    },

    /// Score, check completion, recommend and freeze an assessment
    Finalize {
        #[command(flatten)]
        args: AssessmentArgs,

        /// Finalize even when fewer questions are answered than required
        #[arg(long)]
        force: bool,
    },

    /// Generate ranked recommendations and an improvement roadmap
    Recommend {
        #[command(flatten)]
        args: AssessmentArgs,

        /// Maximum number of recommendations
        #[arg(long)]
        max: Option<usize>,

        /// Only include these types (quick_win, foundational, strategic, transformational)
        #[arg(long, value_delimiter = ',', value_parser = parse_recommendation_type)]
        types: Option<Vec<RecommendationType>>,
    },

    /// Initialize a default .deviq.toml in the current directory
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

fn parse_recommendation_type(value: &str) -> Result<RecommendationType, String> {
    value.parse().map_err(|e: crate::errors::Error| e.to_string())
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Terminal),
            crate::io::output::OutputFormat::Terminal
        );
    }

    #[test]
    fn test_parse_finalize_with_globals() {
        let cli = Cli::parse_from([
            "deviq",
            "finalize",
            "q.json",
            "r.json",
            "--force",
            "--format",
            "json",
            "--config",
            "custom.toml",
            "-vv",
        ]);

        assert_eq!(cli.verbosity, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Finalize { args, force } => {
                assert!(force);
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.questionnaire, PathBuf::from("q.json"));
            }
            _ => panic!("Expected Finalize command"),
        }
    }

    #[test]
    fn test_parse_recommend_types() {
        let cli = Cli::parse_from([
            "deviq",
            "recommend",
            "q.json",
            "r.json",
            "--max",
            "5",
            "--types",
            "quick_win,strategic",
        ]);

        match cli.command {
            Commands::Recommend { max, types, .. } => {
                assert_eq!(max, Some(5));
                assert_eq!(
                    types,
                    Some(vec![
                        RecommendationType::QuickWin,
                        RecommendationType::Strategic
                    ])
                );
            }
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = Cli::try_parse_from(["deviq", "recommend", "q.json", "r.json", "--types", "moonshot"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
