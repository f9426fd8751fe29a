//! Per-user progress records
//!
//! Persistence belongs to an external records service. [`ProgressStore`] is the
//! seam the host reports finished rounds through; [`MemoryProgressStore`] keeps
//! records for the lifetime of the process.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::snapshot::RoundReport;
use crate::types::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub user_id: String,
    pub puzzle_id: String,
    pub category: Option<Category>,
    pub completed: bool,
    pub score: u32,
    pub time_taken: u32,
    pub attempts: u32,
    /// Unix seconds of the completing attempt; cleared by a later failed attempt.
    pub completed_at: Option<u64>,
}

pub trait ProgressStore {
    fn get(&self, user_id: &str, puzzle_id: &str) -> Result<Option<ProgressRecord>>;

    fn list(&self, user_id: &str) -> Result<Vec<ProgressRecord>>;

    /// Create the record on first report, otherwise overwrite the outcome and bump `attempts`.
    fn record(
        &mut self,
        user_id: &str,
        puzzle_id: &str,
        category: Option<Category>,
        report: &RoundReport,
    ) -> Result<ProgressRecord>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    records: BTreeMap<(String, String), ProgressRecord>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl ProgressStore for MemoryProgressStore {
    fn get(&self, user_id: &str, puzzle_id: &str) -> Result<Option<ProgressRecord>> {
        Ok(self
            .records
            .get(&(user_id.to_string(), puzzle_id.to_string()))
            .cloned())
    }

    fn list(&self, user_id: &str) -> Result<Vec<ProgressRecord>> {
        Ok(self
            .records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    fn record(
        &mut self,
        user_id: &str,
        puzzle_id: &str,
        category: Option<Category>,
        report: &RoundReport,
    ) -> Result<ProgressRecord> {
        if user_id.is_empty() || puzzle_id.is_empty() {
            bail!("progress needs both a user id and a puzzle id");
        }

        let completed_at = report.completed.then(unix_now);
        let key = (user_id.to_string(), puzzle_id.to_string());
        let record = match self.records.get_mut(&key) {
            Some(existing) => {
                existing.completed = report.completed;
                existing.score = report.score;
                existing.time_taken = report.time_taken;
                existing.attempts += 1;
                existing.completed_at = completed_at;
                if category.is_some() {
                    existing.category = category;
                }
                existing.clone()
            }
            None => {
                let record = ProgressRecord {
                    user_id: user_id.to_string(),
                    puzzle_id: puzzle_id.to_string(),
                    category,
                    completed: report.completed,
                    score: report.score,
                    time_taken: report.time_taken,
                    attempts: 1,
                    completed_at,
                };
                self.records.insert(key, record.clone());
                record
            }
        };
        Ok(record)
    }
}

/// Dashboard aggregates over a user's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressStats {
    pub completed: usize,
    pub points: u64,
    pub attempts: u64,
}

impl ProgressStats {
    pub fn from_records(records: &[ProgressRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            if r.completed {
                acc.completed += 1;
            }
            acc.points += r.score as u64;
            acc.attempts += r.attempts as u64;
            acc
        })
    }
}
