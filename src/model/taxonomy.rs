//! Static questionnaire taxonomy: Section → Area → Question.
//!
//! The taxonomy is loaded once from seed data and never mutated afterwards.
//! Lookups by id are indexed; iteration always follows display order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::config::normalize_key;
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl Section {
    /// Lookup key used by weights, templates and result maps.
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }
}

fn default_color() -> String {
    "#3b82f6".to_string()
}

fn default_icon() -> String {
    "fas fa-cog".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub section_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub timeline_l1_l2: Option<String>,
    #[serde(default)]
    pub timeline_l2_l3: Option<String>,
    #[serde(default)]
    pub timeline_l3_l4: Option<String>,
}

impl Area {
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }

    /// Timeline hint for moving one level up from `current`.
    pub fn timeline_for(&self, current: u8) -> Option<&str> {
        match current {
            1 => self.timeline_l1_l2.as_deref(),
            2 => self.timeline_l2_l3.as_deref(),
            3 => self.timeline_l3_l4.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub area_id: String,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default)]
    pub level_1_desc: Option<String>,
    #[serde(default)]
    pub level_2_desc: Option<String>,
    #[serde(default)]
    pub level_3_desc: Option<String>,
    #[serde(default)]
    pub level_4_desc: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// One rung of a question's answer scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelDescription<'a> {
    pub level: u8,
    pub score: u8,
    pub description: &'a str,
}

impl Question {
    pub fn level_descriptions(&self) -> Vec<LevelDescription<'_>> {
        [
            &self.level_1_desc,
            &self.level_2_desc,
            &self.level_3_desc,
            &self.level_4_desc,
        ]
        .into_iter()
        .zip(1u8..)
        .filter_map(|(desc, level)| {
            desc.as_deref().map(|description| LevelDescription {
                level,
                score: level,
                description,
            })
        })
        .collect()
    }
}

/// Seed file layout: three flat lists linked by id.
#[derive(Debug, Default, Deserialize)]
struct QuestionnaireSeed {
    #[serde(default)]
    sections: Vec<Section>,
    #[serde(default)]
    areas: Vec<Area>,
    #[serde(default)]
    questions: Vec<Question>,
}

/// The immutable three-level questionnaire.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    sections: Vec<Section>,
    areas: Vec<Area>,
    questions: Vec<Question>,
    section_index: HashMap<String, usize>,
    area_index: HashMap<String, usize>,
    question_index: HashMap<String, usize>,
}

impl Questionnaire {
    /// Build a questionnaire, rejecting duplicate ids, colliding section keys
    /// and orphaned entries.
    pub fn new(
        mut sections: Vec<Section>,
        mut areas: Vec<Area>,
        mut questions: Vec<Question>,
    ) -> Result<Self> {
        sections.sort_by(|a, b| (a.display_order, &a.id).cmp(&(b.display_order, &b.id)));
        areas.sort_by(|a, b| (a.display_order, &a.id).cmp(&(b.display_order, &b.id)));
        questions.sort_by(|a, b| (a.display_order, &a.id).cmp(&(b.display_order, &b.id)));

        let section_index = index_by_id("section", sections.iter().map(|s| s.id.as_str()))?;
        let area_index = index_by_id("area", areas.iter().map(|a| a.id.as_str()))?;
        let question_index = index_by_id("question", questions.iter().map(|q| q.id.as_str()))?;

        // Weights and result maps are keyed by section key; keys must be unique.
        let mut section_keys: HashMap<String, String> = HashMap::new();
        for section in &sections {
            if let Some(first) = section_keys.insert(section.key(), section.id.clone()) {
                return Err(Error::validation(format!(
                    "Sections '{}' and '{}' share the key '{}'",
                    first,
                    section.id,
                    section.key()
                )));
            }
        }

        let orphaned_areas: Vec<&str> = areas
            .iter()
            .filter(|a| !section_index.contains_key(&a.section_id))
            .map(|a| a.id.as_str())
            .collect();
        if !orphaned_areas.is_empty() {
            return Err(Error::validation(format!(
                "Areas reference unknown sections: {}",
                orphaned_areas.join(", ")
            )));
        }

        let orphaned_questions: Vec<&str> = questions
            .iter()
            .filter(|q| !area_index.contains_key(&q.area_id))
            .map(|q| q.id.as_str())
            .collect();
        if !orphaned_questions.is_empty() {
            return Err(Error::validation(format!(
                "Questions reference unknown areas: {}",
                orphaned_questions.join(", ")
            )));
        }

        Ok(Self {
            sections,
            areas,
            questions,
            section_index,
            area_index,
            question_index,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let seed: QuestionnaireSeed = serde_json::from_str(json)?;
        Self::new(seed.sections, seed.areas, seed.questions)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let questionnaire = Self::from_json_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            sections = questionnaire.sections.len(),
            areas = questionnaire.areas.len(),
            questions = questionnaire.questions.len(),
            "Loaded questionnaire"
        );
        Ok(questionnaire)
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.section_index.get(id).map(|&i| &self.sections[i])
    }

    pub fn section_by_key(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key() == key)
    }

    pub fn area(&self, id: &str) -> Option<&Area> {
        self.area_index.get(id).map(|&i| &self.areas[i])
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.question_index.get(id).map(|&i| &self.questions[i])
    }

    /// Areas of a section in display order.
    pub fn areas_in<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a Area> + 'a {
        self.areas.iter().filter(move |a| a.section_id == section_id)
    }

    /// Active questions of an area in display order.
    pub fn questions_in<'a>(&'a self, area_id: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions
            .iter()
            .filter(move |q| q.is_active && q.area_id == area_id)
    }

    /// Section a question belongs to.
    pub fn section_of(&self, question_id: &str) -> Option<&Section> {
        let question = self.question(question_id)?;
        let area = self.area(&question.area_id)?;
        self.section(&area.section_id)
    }

    /// Active questions ordered by section, then area, then question.
    pub fn ordered_questions(&self) -> impl Iterator<Item = &Question> + '_ {
        self.sections.iter().flat_map(move |section| {
            self.areas_in(&section.id)
                .flat_map(move |area| self.questions_in(&area.id))
        })
    }

    pub fn total_questions(&self) -> usize {
        self.questions.iter().filter(|q| q.is_active).count()
    }

    pub fn section_question_count(&self, section_id: &str) -> usize {
        self.areas_in(section_id)
            .map(|area| self.questions_in(&area.id).count())
            .sum()
    }
}

fn index_by_id<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        if index.insert(id.to_string(), i).is_some() {
            return Err(Error::validation(format!("Duplicate {} id '{}'", kind, id)));
        }
    }
    Ok(index)
}
