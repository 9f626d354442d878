//! JSON-lines game transcripts.

use derive_more::{Display, Error};
use oanquan::{GameResult, MoveRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// One line of a transcript.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TranscriptEntry<'a> {
    /// A move was applied.
    Move {
        /// 1-based game number within the run.
        game: u32,
        /// The applied move.
        record: &'a MoveRecord,
    },
    /// A game finished.
    Result {
        /// 1-based game number within the run.
        game: u32,
        /// Names of the agents seated as A and B.
        players: [&'a str; 2],
        /// How it ended.
        result: &'a GameResult,
    },
}

/// Append-only transcript file, one JSON object per line.
#[derive(Debug)]
pub struct Transcript {
    path: PathBuf,
    file: tokio::fs::File,
}

impl Transcript {
    /// Opens `path` for appending, creating it if needed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn create(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| TranscriptError::new(format!("Failed to open {}: {}", path.display(), e)))?;
        info!("Transcript opened");
        Ok(Self { path, file })
    }

    /// Transcript location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry and flushes it.
    pub async fn append(&mut self, entry: &TranscriptEntry<'_>) -> Result<(), TranscriptError> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| TranscriptError::new(format!("Failed to serialize entry: {}", e)))?;
        line.push('\n');
        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(|e| TranscriptError::new(format!("Failed to write {}: {}", self.path.display(), e)))?;
        self.file
            .flush()
            .await
            .map_err(|e| TranscriptError::new(format!("Failed to flush {}: {}", self.path.display(), e)))?;
        debug!(bytes = line.len(), "Transcript entry written");
        Ok(())
    }
}

/// Transcript I/O error.
#[derive(Debug, Clone, Display, Error)]
#[display("Transcript error: {} at {}:{}", message, file, line)]
pub struct TranscriptError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TranscriptError {
    /// Creates a new transcript error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
