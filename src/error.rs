//! Errors from the persistence layer
//!
//! These never reach gameplay: the store trait logs and swallows them.

use std::fmt;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    Io { path: PathBuf, source: io::Error },
    /// File contents weren't a non-negative integer
    Parse { path: PathBuf, source: ParseIntError },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
            Self::Parse { path, source } => {
                write!(f, "corrupt high score in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
