//! Plain text file store

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::HighScoreStore;
use crate::error::StoreError;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "bird_highscore.txt";

/// High score kept as one integer in a text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored value. A missing file or blank file is 0.
    pub fn try_load(&self) -> Result<u64, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed.parse::<u64>().map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `score`
    pub fn try_save(&self, score: u64) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl HighScoreStore for FileStore {
    fn load_high_score(&mut self) -> u64 {
        match self.try_load() {
            Ok(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Err(e) => {
                log::warn!("{e}; starting from 0");
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) {
        match self.try_save(score) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("High score not saved: {e}"),
        }
    }
}
