//! High score persistence
//!
//! The stored value is a single plain decimal integer. Loading never fails
//! (missing or corrupt data reads as 0) and saving is best effort.

mod file;

pub use file::{DEFAULT_HIGH_SCORE_FILE, FileStore};

/// Load/save contract for the persisted high score
pub trait HighScoreStore {
    /// Stored high score, or 0 if missing/corrupt
    fn load_high_score(&mut self) -> u64;

    /// Persist a new high score. Failures are logged and swallowed.
    fn save_high_score(&mut self, score: u64);
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    saves: u32,
}

impl MemoryStore {
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }

    /// Last value written through `save_high_score`, if any
    pub fn saved(&self) -> Option<u64> {
        if self.saves > 0 { self.value } else { None }
    }

    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u64) {
        self.value = Some(score);
        self.saves += 1;
    }
}
