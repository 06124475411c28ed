//! Step-by-step guidance for reaching the next maturity level in an area.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{Error, Result};

/// Reference guidance for one area and one target level (2, 3 or 4).
///
/// Text fields hold pipe-delimited lists as they appear in the seed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityProgression {
    pub area_id: String,
    pub target_level: u8,
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub action_items: Option<String>,
    #[serde(default)]
    pub success_metrics: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub common_pitfall: Option<String>,
}

/// Action items sharing a `Category: a, b, c` prefix, or a standalone item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItemGroup {
    pub category: Option<String>,
    pub items: Vec<String>,
}

/// Progression data parsed for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionGuidance {
    pub area_id: String,
    pub target_level: u8,
    pub prerequisites: Vec<String>,
    pub action_items: Vec<ActionItemGroup>,
    pub success_metrics: Vec<String>,
    pub timeline: Option<String>,
    pub common_pitfall: Option<String>,
}

impl MaturityProgression {
    pub fn validate(&self) -> Result<()> {
        if (2..=4).contains(&self.target_level) {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "Progression for area '{}' targets level {}; expected 2-4",
                self.area_id, self.target_level
            )))
        }
    }

    pub fn guidance(&self) -> ProgressionGuidance {
        ProgressionGuidance {
            area_id: self.area_id.clone(),
            target_level: self.target_level,
            prerequisites: split_list(self.prerequisites.as_deref()),
            action_items: parse_action_items(self.action_items.as_deref()),
            success_metrics: split_list(self.success_metrics.as_deref()),
            timeline: self.timeline.clone(),
            common_pitfall: self.common_pitfall.clone(),
        }
    }
}

fn split_list(text: Option<&str>) -> Vec<String> {
    text.unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn parse_action_items(text: Option<&str>) -> Vec<ActionItemGroup> {
    split_list(text)
        .into_iter()
        .map(|entry| match entry.split_once(':') {
            Some((category, rest)) => ActionItemGroup {
                category: Some(category.trim().to_string()),
                items: rest
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(String::from)
                    .collect(),
            },
            None => ActionItemGroup {
                category: None,
                items: vec![entry],
            },
        })
        .collect()
}

#[derive(Debug, Default, Deserialize)]
struct ProgressionSeed {
    #[serde(default)]
    progressions: Vec<MaturityProgression>,
}

/// All progression guidance, indexed by area and target level.
#[derive(Debug, Clone, Default)]
pub struct ProgressionCatalog {
    entries: BTreeMap<(String, u8), MaturityProgression>,
}

impl ProgressionCatalog {
    pub fn new(progressions: Vec<MaturityProgression>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for progression in progressions {
            progression.validate()?;
            let key = (progression.area_id.clone(), progression.target_level);
            if entries.insert(key, progression).is_some() {
                return Err(Error::validation("Duplicate progression for area and level"));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let seed: ProgressionSeed = serde_json::from_str(json)?;
        Self::new(seed.progressions)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn get(&self, area_id: &str, target_level: u8) -> Option<&MaturityProgression> {
        self.entries.get(&(area_id.to_string(), target_level))
    }

    /// Every progression of an area, keyed by target level.
    pub fn for_area(&self, area_id: &str) -> BTreeMap<u8, &MaturityProgression> {
        self.entries
            .iter()
            .filter(|((area, _), _)| area == area_id)
            .map(|((_, level), progression)| (*level, progression))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> MaturityProgression {
        MaturityProgression {
            area_id: "FC-1".into(),
            target_level: 2,
            prerequisites: Some("Budget approval | | Tool inventory ".into()),
            action_items: Some(
                "Pilot: pick a team, enable assistants, | Write usage guidelines".into(),
            ),
            success_metrics: Some("50% weekly active users".into()),
            timeline: Some("4-6 weeks".into()),
            common_pitfall: None,
        }
    }

    #[test]
    fn test_guidance_parses_pipe_lists() {
        let guidance = sample().guidance();
        assert_eq!(guidance.prerequisites, vec!["Budget approval", "Tool inventory"]);
        assert_eq!(guidance.success_metrics, vec!["50% weekly active users"]);
        assert_eq!(
            guidance.action_items,
            vec![
                ActionItemGroup {
                    category: Some("Pilot".into()),
                    items: vec!["pick a team".into(), "enable assistants".into()],
                },
                ActionItemGroup {
                    category: None,
                    items: vec!["Write usage guidelines".into()],
                },
            ]
        );
    }

    #[test]
    fn test_empty_fields_yield_empty_lists() {
        let progression = MaturityProgression {
            prerequisites: None,
            action_items: None,
            ..sample()
        };
        let guidance = progression.guidance();
        assert!(guidance.prerequisites.is_empty());
        assert!(guidance.action_items.is_empty());
    }

    #[test]
    fn test_catalog_rejects_level_one() {
        let result = ProgressionCatalog::new(vec![MaturityProgression {
            target_level: 1,
            ..sample()
        }]);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = ProgressionCatalog::new(vec![
            sample(),
            MaturityProgression {
                target_level: 3,
                ..sample()
            },
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("FC-1", 3).is_some());
        assert!(catalog.get("FC-1", 4).is_none());
        assert_eq!(catalog.for_area("FC-1").keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    }
}
