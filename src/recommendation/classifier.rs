//! Keyword heuristics that derive impact, feasibility, type and tags from
//! recommendation text.
//!
//! Matching is case-insensitive substring search over fixed vocabularies.

use super::types::{FeasibilityLevel, ImpactLevel, Rating, RecommendationType};

/// Metadata a classifier derives from one recommendation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextClassification {
    pub impact: ImpactLevel,
    pub feasibility: FeasibilityLevel,
    pub rec_type: RecommendationType,
}

/// Derives recommendation metadata from text.
pub trait RecommendationClassifier: Send + Sync {
    fn classify(&self, text: &str) -> TextClassification;

    fn tags(&self, text: &str) -> Vec<String> {
        extract_recommendation_tags(text)
    }
}

const QUICK_WIN_KEYWORDS: &[&str] = &[
    "basic",
    "simple",
    "start",
    "begin",
    "deploy",
    "use",
    "add",
    "experiment",
    "introduce",
    "initial",
    "2-hour",
    "workshop",
];

const FOUNDATIONAL_KEYWORDS: &[&str] = &[
    "establish",
    "create",
    "implement",
    "systematic",
    "framework",
    "training",
    "standardize",
    "governance",
    "policy",
    "process",
];

const STRATEGIC_KEYWORDS: &[&str] = &[
    "enterprise",
    "organization",
    "strategic",
    "comprehensive",
    "roadmap",
    "transformation",
    "culture",
    "leadership",
];

const TRANSFORMATIONAL_KEYWORDS: &[&str] = &[
    "autonomous",
    "automated",
    "ai-first",
    "intelligent",
    "advanced",
    "revolutionary",
    "paradigm",
    "reimagine",
    "reinvent",
];

const TOPIC_TAGS: &[(&str, &[&str])] = &[
    ("ai", &["ai", "artificial intelligence"]),
    ("automation", &["automat", "autonomous"]),
    ("testing", &["test", "qa", "quality"]),
    ("ci/cd", &["ci/cd", "pipeline", "deployment"]),
    ("tools", &["tool", "platform", "infrastructure"]),
    ("training", &["training", "education", "literacy"]),
    ("governance", &["governance", "policy", "compliance"]),
    ("integration", &["integration", "enterprise", "system"]),
];

const SCOPE_TAGS: &[(&str, &str)] = &[
    ("team", "team-level"),
    ("enterprise", "enterprise-level"),
    ("individual", "individual-level"),
];

fn count_matches(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

/// Impact and feasibility start at medium and are adjusted by a handful of
/// marker words, applied in order so later markers win.
pub fn estimate_impact_feasibility(text: &str) -> (ImpactLevel, FeasibilityLevel) {
    let text = text.to_lowercase();
    let mut impact = Rating::Medium;
    let mut feasibility = Rating::Medium;

    if text.contains("comprehensive") {
        impact = Rating::High;
    }
    if text.contains("autonomous") {
        impact = Rating::High;
        feasibility = Rating::Low;
    }
    if text.contains("basic") {
        feasibility = Rating::High;
    }
    if text.contains("experiment") {
        feasibility = Rating::High;
        impact = Rating::Low;
    }

    (impact, feasibility)
}

pub fn classify_recommendation_type(
    text: &str,
    impact: ImpactLevel,
    feasibility: FeasibilityLevel,
) -> RecommendationType {
    let text = text.to_lowercase();

    if feasibility == Rating::High
        && impact != Rating::High
        && count_matches(&text, QUICK_WIN_KEYWORDS) > 0
    {
        return RecommendationType::QuickWin;
    }
    if count_matches(&text, TRANSFORMATIONAL_KEYWORDS) > 0 || impact == Rating::High {
        return RecommendationType::Transformational;
    }
    if count_matches(&text, STRATEGIC_KEYWORDS) > 0 {
        return RecommendationType::Strategic;
    }
    if count_matches(&text, FOUNDATIONAL_KEYWORDS) > 0 {
        return RecommendationType::Foundational;
    }

    match (feasibility, impact) {
        (Rating::High, _) => RecommendationType::QuickWin,
        (_, Rating::High) => RecommendationType::Transformational,
        _ => RecommendationType::Foundational,
    }
}

/// Topic and scope tags, sorted and without duplicates.
pub fn extract_recommendation_tags(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    let mut tags: Vec<String> = TOPIC_TAGS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(tag, _)| tag.to_string())
        .chain(
            SCOPE_TAGS
                .iter()
                .filter(|(word, _)| text.contains(word))
                .map(|(_, tag)| tag.to_string()),
        )
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// The vocabulary-driven classifier used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl RecommendationClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> TextClassification {
        let (impact, feasibility) = estimate_impact_feasibility(text);
        TextClassification {
            impact,
            feasibility,
            rec_type: classify_recommendation_type(text, impact, feasibility),
        }
    }
}
