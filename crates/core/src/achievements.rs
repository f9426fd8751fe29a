//! Achievement definitions and unlock rules
//!
//! Conditions use the records service's string form:
//! `complete_puzzles:<count>` or `category_complete:<category>`.

use serde::{Deserialize, Serialize};

use crate::progress::ProgressRecord;
use crate::types::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UnlockCondition {
    CompletePuzzles { count: usize },
    CategoryComplete { category: Category },
    /// Unparseable condition; never unlocks.
    Never,
}

impl UnlockCondition {
    pub fn parse(s: &str) -> Self {
        let Some((key, arg)) = s.trim().split_once(':') else {
            return UnlockCondition::Never;
        };
        match key {
            "complete_puzzles" => arg
                .trim()
                .parse()
                .map(|count| UnlockCondition::CompletePuzzles { count })
                .unwrap_or(UnlockCondition::Never),
            "category_complete" => Category::from_str(arg)
                .map(|category| UnlockCondition::CategoryComplete { category })
                .unwrap_or(UnlockCondition::Never),
            _ => UnlockCondition::Never,
        }
    }

    /// `completed` must already be filtered to completed records.
    fn is_met(&self, completed: &[&ProgressRecord]) -> bool {
        match self {
            UnlockCondition::CompletePuzzles { count } => completed.len() >= *count,
            UnlockCondition::CategoryComplete { category } => completed
                .iter()
                .any(|r| r.category == Some(*category)),
            UnlockCondition::Never => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub condition: UnlockCondition,
}

impl Achievement {
    pub fn new(id: u32, title: &str, description: &str, points: u32, condition: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            points,
            condition: UnlockCondition::parse(condition),
        }
    }
}

/// Built-in catalog, ordered by points ascending.
pub fn default_catalog() -> Vec<Achievement> {
    let mut catalog = vec![
        Achievement::new(
            1,
            "First Steps",
            "Complete your first puzzle.",
            10,
            "complete_puzzles:1",
        ),
        Achievement::new(
            2,
            "Pattern Spotter",
            "Complete a pattern puzzle.",
            15,
            "category_complete:pattern",
        ),
        Achievement::new(
            3,
            "Wordsmith",
            "Complete a word puzzle.",
            15,
            "category_complete:word",
        ),
        Achievement::new(
            4,
            "Number Cruncher",
            "Complete a math puzzle.",
            15,
            "category_complete:math",
        ),
        Achievement::new(
            5,
            "Logician",
            "Complete a logic puzzle.",
            15,
            "category_complete:logic",
        ),
        Achievement::new(
            6,
            "Puzzle Enthusiast",
            "Complete 5 puzzles.",
            25,
            "complete_puzzles:5",
        ),
        Achievement::new(
            7,
            "Brain Master",
            "Complete 10 puzzles.",
            50,
            "complete_puzzles:10",
        ),
    ];
    catalog.sort_by_key(|a| a.points);
    catalog
}

/// Achievements from `catalog` unlocked by `records`.
pub fn unlocked<'a>(
    catalog: &'a [Achievement],
    records: &[ProgressRecord],
) -> Vec<&'a Achievement> {
    let completed: Vec<&ProgressRecord> = records.iter().filter(|r| r.completed).collect();
    catalog
        .iter()
        .filter(|a| a.condition.is_met(&completed))
        .collect()
}
