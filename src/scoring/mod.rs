//! Scoring pipeline: aggregation, maturity classification, completion
//! tracking, benchmarks and trends.

pub mod aggregate;
pub mod benchmarks;
pub mod completion;
pub mod maturity;
pub mod results;
pub mod trends;

pub use aggregate::{
    calculate_section_coverage, calculate_weighted_average, format_score_display,
    in_display_order, normalize_score, validate_score_inputs, AreaScore, ScoreAggregator,
    SectionScore, SectionScores,
};
pub use benchmarks::{section_benchmark, BenchmarkPosition, SectionBenchmark};
pub use completion::{completion_percentage, CompletionGate, CompletionStatus, SectionProgress};
pub use maturity::{
    calculate_improvement_potential, classify_maturity_level, ImprovementPotential,
    MaturityDetails, MaturityLevel,
};
pub use results::{AssessmentResults, ScoringEngine, ScoringMetadata, SCORING_VERSION};
pub use trends::ScoreTrends;
