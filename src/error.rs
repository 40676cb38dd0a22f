//! Error types for the persistence bridge.
//!
//! Nothing here is fatal: callers in `score` log these and fall back to a
//! zero high score or skip the save.

use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum ScoreError {
    /// The high-score file could not be read or written.
    Io {
        path: PathBuf,
        source: io::Error,
    },

    /// The file exists but does not hold a non-negative integer.
    Malformed {
        path: PathBuf,
        /// Trimmed file content, for the log line.
        content: String,
    },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Io { path, source } => {
                write!(f, "high score file '{}': {}", path.display(), source)
            }
            ScoreError::Malformed { path, content } => write!(
                f,
                "high score file '{}' holds '{}', expected a whole number",
                path.display(),
                content
            ),
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Io { source, .. } => Some(source),
            ScoreError::Malformed { .. } => None,
        }
    }
}

pub type ScoreResult<T> = Result<T, ScoreError>;
