//! Score persistence.
//!
//! A finished session's summary is handed to a [`ScoreSink`]; the
//! shipped sink keeps a local JSON file of best results. Crediting an
//! external rewards ledger would live behind the same trait.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::engine::SessionSummary;

/// At most this many records are kept on disk.
const MAX_RECORDS: usize = 50;

#[derive(Debug)]
pub enum ScoreError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Io(e) => write!(f, "failed to access score file: {}", e),
            ScoreError::Parse(e) => write!(f, "failed to parse score file: {}", e),
        }
    }
}

impl std::error::Error for ScoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreError::Io(e) => Some(e),
            ScoreError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ScoreError {
    fn from(err: io::Error) -> Self {
        ScoreError::Io(err)
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        ScoreError::Parse(err)
    }
}

/// A stored result: the session summary plus when it was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub recorded_unix: u64,
    #[serde(flatten)]
    pub summary: SessionSummary,
}

/// Where finished sessions go. `best` feeds the summary screen's
/// leaderboard.
pub trait ScoreSink {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), ScoreError>;
    fn best(&self, limit: usize) -> Vec<ScoreRecord>;
}

/// JSON-file sink: records sorted by points descending, capped at
/// [`MAX_RECORDS`].
pub struct JsonScoreSink {
    path: PathBuf,
}

impl JsonScoreSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<ScoreRecord>, ScoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreSink for JsonScoreSink {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), ScoreError> {
        let mut records = self.load()?;
        records.push(ScoreRecord {
            recorded_unix: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            summary: summary.clone(),
        });
        records.sort_by(|a, b| b.summary.points.cmp(&a.summary.points));
        records.truncate(MAX_RECORDS);

        fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    fn best(&self, limit: usize) -> Vec<ScoreRecord> {
        let mut records = self.load().unwrap_or_default();
        records.truncate(limit);
        records
    }
}

/// In-memory sink for tests and for running without persistence.
#[derive(Default)]
pub struct MemoryScoreSink {
    records: Vec<ScoreRecord>,
}

impl ScoreSink for MemoryScoreSink {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), ScoreError> {
        self.records.push(ScoreRecord {
            recorded_unix: 0,
            summary: summary.clone(),
        });
        self.records
            .sort_by(|a, b| b.summary.points.cmp(&a.summary.points));
        Ok(())
    }

    fn best(&self, limit: usize) -> Vec<ScoreRecord> {
        self.records.iter().take(limit).cloned().collect()
    }
}
