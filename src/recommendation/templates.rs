//! Static recommendation text keyed by level transition and section.
//!
//! Templates are read once, from a JSON file shaped like
//! `{"recommendations": {"level_transitions": {"1_to_2": {"section_key": [..]}}}}`.
//! A missing file falls back to the built-in set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};

type TransitionTable = BTreeMap<String, BTreeMap<String, Vec<String>>>;

#[derive(Debug, Default, Serialize, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    recommendations: TemplateBody,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TemplateBody {
    #[serde(default)]
    level_transitions: TransitionTable,
}

/// Where a template set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    File(PathBuf),
    BuiltIn,
}

#[derive(Debug, Clone)]
pub struct RecommendationTemplates {
    transitions: TransitionTable,
    source: TemplateSource,
}

/// Key of a level transition, e.g. `"2_to_3"`.
pub fn transition_key(current_level: u8, target_level: u8) -> String {
    format!("{}_to_{}", current_level, target_level)
}

impl RecommendationTemplates {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TemplateFile = serde_json::from_str(json)?;
        Ok(Self {
            transitions: file.recommendations.level_transitions,
            source: TemplateSource::BuiltIn,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut templates = Self::from_json_str(&contents).map_err(|e| Error::Template {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        templates.source = TemplateSource::File(path.to_path_buf());
        Ok(templates)
    }

    /// Load from `path` when given. A file that does not exist falls back to
    /// the built-in set with a warning; a file that exists but does not parse
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Recommendation templates not found, using built-in defaults"
            );
            return Ok(Self::builtin());
        }

        let templates = Self::from_file(path)?;
        tracing::info!(
            path = %path.display(),
            transitions = templates.transitions.len(),
            "Loaded recommendation templates"
        );
        Ok(templates)
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn transition_keys(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }

    /// Template texts for a section moving between two levels. Unknown
    /// transitions or sections yield an empty slice.
    pub fn lookup(&self, current_level: u8, target_level: u8, section_key: &str) -> &[String] {
        self.transitions
            .get(&transition_key(current_level, target_level))
            .and_then(|sections| sections.get(section_key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        let file = TemplateFile {
            recommendations: TemplateBody {
                level_transitions: self.transitions.clone(),
            },
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn builtin() -> Self {
        let transitions = BUILTIN
            .iter()
            .map(|(transition, sections)| {
                let sections = sections
                    .iter()
                    .map(|(section, texts)| {
                        (
                            section.to_string(),
                            texts.iter().map(|t| t.to_string()).collect(),
                        )
                    })
                    .collect();
                (transition.to_string(), sections)
            })
            .collect();

        Self {
            transitions,
            source: TemplateSource::BuiltIn,
        }
    }
}

impl Default for RecommendationTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

type SectionTexts = (&'static str, [&'static str; 4]);

const BUILTIN: [(&str, [SectionTexts; 4]); 3] = [
    (
        "1_to_2",
        [
            (
                "foundational_capabilities",
                [
                    "Deploy basic AI assistants like GitHub Copilot for individual developers",
                    "Conduct AI literacy training with prompt engineering basics",
                    "Begin using AI for code completion and documentation",
                    "Establish AI tool usage guidelines and best practices",
                ],
            ),
            (
                "transformation_capabilities",
                [
                    "Experiment with AI-assisted requirement analysis",
                    "Begin AI-assisted test case generation for unit tests",
                    "Add AI insights to CI/CD pipelines for build analysis",
                    "Use AI for legacy system documentation",
                ],
            ),
            (
                "enterprise_integration",
                [
                    "Assess current AI tool costs and usage patterns",
                    "Standardize AI tools across small teams",
                    "Create inventory of systems for AI integration",
                    "Establish data classification for AI usage",
                ],
            ),
            (
                "strategic_governance",
                [
                    "Create initial AI ethics awareness and guidelines",
                    "Track AI tool usage and developer satisfaction",
                    "Develop policies for AI-generated code IP concerns",
                    "Monitor AI-related risks with basic oversight",
                ],
            ),
        ],
    ),
    (
        "2_to_3",
        [
            (
                "foundational_capabilities",
                [
                    "Scale to team-wide adoption with standardized toolchain",
                    "Implement structured AI training programs",
                    "Establish systematic AI code review processes",
                    "Deploy automated documentation generation",
                ],
            ),
            (
                "transformation_capabilities",
                [
                    "Build AI systems for architecture proposal generation",
                    "Implement comprehensive AI-driven testing (50-85%)",
                    "Create intelligent CI/CD pipelines with optimization",
                    "Develop AI-powered migration planning",
                ],
            ),
            (
                "enterprise_integration",
                [
                    "Implement enterprise-wide AI tool standards",
                    "Deploy automated enterprise system integration",
                    "Establish automated cost tracking and optimization",
                    "Create systematic data governance framework",
                ],
            ),
            (
                "strategic_governance",
                [
                    "Establish comprehensive AI ethics framework",
                    "Implement comprehensive productivity metrics",
                    "Create structured change management programs",
                    "Develop systematic compliance management",
                ],
            ),
        ],
    ),
    (
        "3_to_4",
        [
            (
                "foundational_capabilities",
                [
                    "Achieve enterprise-grade AI platform integration",
                    "Develop advanced AI expertise across teams",
                    "Implement AI-first development workflows",
                    "Create intelligent knowledge systems",
                ],
            ),
            (
                "transformation_capabilities",
                [
                    "Deploy automated intent-to-architecture pipelines",
                    "Achieve fully autonomous testing (85%+)",
                    "Implement autonomous CI/CD with self-healing",
                    "Complete autonomous legacy transformation",
                ],
            ),
            (
                "enterprise_integration",
                [
                    "Establish strategic AI vendor partnerships",
                    "Achieve seamless AI-powered integrations",
                    "Implement advanced cost optimization models",
                    "Deploy advanced resilience systems",
                ],
            ),
            (
                "strategic_governance",
                [
                    "Implement automated ethics compliance monitoring",
                    "Deploy advanced analytics with predictive modeling",
                    "Achieve seamless multi-agent collaboration",
                    "Lead strategic innovation programs",
                ],
            ),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_lookup() {
        let templates = RecommendationTemplates::builtin();
        let texts = templates.lookup(1, 2, "foundational_capabilities");
        assert_eq!(texts.len(), 4);
        assert!(texts[0].starts_with("Deploy basic AI assistants"));
        assert_eq!(templates.transition_keys().count(), 3);
    }

    #[test]
    fn test_lookup_miss_is_empty() {
        let templates = RecommendationTemplates::builtin();
        assert!(templates.lookup(4, 4, "foundational_capabilities").is_empty());
        assert!(templates.lookup(1, 2, "culture").is_empty());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let templates =
            RecommendationTemplates::load(Some(Path::new("/nonexistent/recommendations.json")))
                .unwrap();
        assert_eq!(templates.source(), &TemplateSource::BuiltIn);
        assert_eq!(templates.lookup(2, 3, "strategic_governance").len(), 4);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            indoc! {r#"
                {"recommendations": {"level_transitions": {
                    "1_to_2": {"culture": ["Run a lunch-and-learn"]}
                }}}
            "#}
        )
        .unwrap();

        let templates = RecommendationTemplates::load(Some(file.path())).unwrap();
        assert_eq!(templates.source(), &TemplateSource::File(file.path().to_path_buf()));
        assert_eq!(templates.lookup(1, 2, "culture"), ["Run a lunch-and-learn"]);
        assert!(templates.lookup(1, 2, "foundational_capabilities").is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = RecommendationTemplates::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }

    #[test]
    fn test_json_export_parses_back() {
        let builtin = RecommendationTemplates::builtin();
        let parsed = RecommendationTemplates::from_json_str(&builtin.to_json_pretty().unwrap()).unwrap();
        assert_eq!(
            parsed.lookup(3, 4, "enterprise_integration"),
            builtin.lookup(3, 4, "enterprise_integration")
        );
    }
}
