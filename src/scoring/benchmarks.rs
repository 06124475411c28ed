use serde::{Deserialize, Serialize};

/// Industry reference scores for one section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBenchmark {
    pub industry_average: f64,
    pub top_quartile: f64,
    pub best_in_class: f64,
}

const DEFAULT_BENCHMARK: SectionBenchmark = SectionBenchmark {
    industry_average: 2.0,
    top_quartile: 2.5,
    best_in_class: 3.2,
};

/// Where a score sits relative to a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkPosition {
    BelowAverage,
    AboveAverage,
    TopQuartile,
    BestInClass,
}

impl BenchmarkPosition {
    pub fn label(&self) -> &'static str {
        match self {
            BenchmarkPosition::BelowAverage => "below industry average",
            BenchmarkPosition::AboveAverage => "above industry average",
            BenchmarkPosition::TopQuartile => "top quartile",
            BenchmarkPosition::BestInClass => "best in class",
        }
    }
}

impl SectionBenchmark {
    pub fn position(&self, score: f64) -> BenchmarkPosition {
        if score >= self.best_in_class {
            BenchmarkPosition::BestInClass
        } else if score >= self.top_quartile {
            BenchmarkPosition::TopQuartile
        } else if score >= self.industry_average {
            BenchmarkPosition::AboveAverage
        } else {
            BenchmarkPosition::BelowAverage
        }
    }
}

/// Benchmark for a section key; unknown sections get the generic benchmark.
pub fn section_benchmark(section_key: &str) -> SectionBenchmark {
    let (industry_average, top_quartile, best_in_class) = match section_key {
        "foundational_capabilities" => (2.1, 2.8, 3.5),
        "transformation_capabilities" => (1.9, 2.6, 3.3),
        "enterprise_integration" => (1.7, 2.4, 3.1),
        "strategic_governance" => (1.6, 2.3, 3.0),
        _ => return DEFAULT_BENCHMARK,
    };
    SectionBenchmark {
        industry_average,
        top_quartile,
        best_in_class,
    }
}
