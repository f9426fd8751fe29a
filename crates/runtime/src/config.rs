//! Runtime configuration from environment variables.

use braintwist_core::{PuzzleGenerator, Session, SessionOptions};

use crate::types::{Difficulty, COUNTDOWN_PERIOD_MS, LOAD_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Raw category tag; unknown tags play the fallback puzzle.
    pub category: String,
    pub difficulty: Difficulty,
    pub options: SessionOptions,
    /// Fixed generator seed for reproducible runs; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Key for progress records.
    pub user_id: String,
    pub log_path: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            category: "pattern".to_string(),
            difficulty: Difficulty::Easy,
            options: SessionOptions::default(),
            seed: None,
            user_id: "guest".to_string(),
            log_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Create from environment variables
    ///
    /// - `BRAINTWIST_CATEGORY`: pattern | word | math | logic (default: pattern)
    /// - `BRAINTWIST_DIFFICULTY`: easy | medium | hard (default: easy)
    /// - `BRAINTWIST_LOAD_DELAY_MS`: simulated load latency (default: 800)
    /// - `BRAINTWIST_TICK_MS`: countdown step period (default: 1000)
    /// - `BRAINTWIST_SEED`: fixed puzzle seed
    /// - `BRAINTWIST_USER`: progress user id (default: guest)
    /// - `BRAINTWIST_LOG_PATH`: log file; logging is off when unset
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] over an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            var(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let category = non_empty("BRAINTWIST_CATEGORY").unwrap_or_else(|| "pattern".to_string());
        let difficulty = non_empty("BRAINTWIST_DIFFICULTY")
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or_default();

        let load_delay_ms = non_empty("BRAINTWIST_LOAD_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(LOAD_DELAY_MS);
        let countdown_period_ms = non_empty("BRAINTWIST_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(COUNTDOWN_PERIOD_MS);

        let seed = non_empty("BRAINTWIST_SEED").and_then(|s| s.parse().ok());
        let user_id = non_empty("BRAINTWIST_USER").unwrap_or_else(|| "guest".to_string());
        let log_path = non_empty("BRAINTWIST_LOG_PATH");

        Self {
            category,
            difficulty,
            options: SessionOptions {
                load_delay_ms,
                countdown_period_ms,
            },
            seed,
            user_id,
            log_path,
        }
    }

    /// Fresh session for this configuration, not yet opened.
    pub fn build_session(&self) -> Session {
        let generator = self
            .seed
            .map(PuzzleGenerator::with_seed)
            .unwrap_or_default();
        Session::with_generator(&self.category, self.options, generator)
            .with_difficulty(self.difficulty)
    }
}
