//! Error types for the persistence layer.

use std::path::PathBuf;

use thiserror::Error;

/// Save, load or leaderboard I/O failed. In-memory state is never touched
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is empty")]
    Empty(PathBuf),

    #[error("save file is malformed: {0}")]
    Malformed(#[from] SnapshotError),
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Problems found while parsing snapshot text. Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("missing {0} line")]
    MissingLine(&'static str),

    #[error("line {line}: expected a number, found {value:?}")]
    BadNumber { line: usize, value: String },

    #[error("line {line}: expected `x,y`, found {value:?}")]
    BadPair { line: usize, value: String },

    #[error("{0} list is not terminated by END")]
    MissingEnd(&'static str),

    #[error("score {score} does not match {kills} kills")]
    ScoreMismatch { score: u32, kills: u32 },
}
