//! Session logging and persistence.
//!
//! A [`SessionLogger`] observes a session: it receives every finished
//! [`MatchRecord`] and, once the session ends, its [`SessionSummary`].
//!
//! - [`MemoryLogger`] keeps everything in memory behind a shared handle.
//! - [`FileLogger`] writes the summary to
//!   `<dir>/<game>/<game>_<timestamp>.<ext>` as JSON or bincode.
//!
//! Logger errors are reported by the session as warnings; they never
//! change the outcome of a match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::Marker;
use crate::error::{Error, Result};
use crate::players::ParticipantInfo;
use crate::search::SearchMode;

use super::driver::MatchRecord;
use super::scores::{ScoreTable, Standings};

/// Everything recorded about a finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub game: String,
    pub mode: SearchMode,
    pub max_depth: Option<u32>,
    pub reference: Option<Marker>,
    pub initial_snapshot: String,
    pub participants: Vec<ParticipantInfo>,
    pub total_matches: usize,
    pub scores: ScoreTable,
    pub final_winners: Standings,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub total_duration_ms: u64,
    pub matches: Vec<MatchRecord>,
}

/// Observer of a session's matches.
pub trait SessionLogger {
    /// Called after each match with its final record.
    fn record_match(&mut self, record: &MatchRecord) -> Result<()>;

    /// Called once when the session finishes.
    fn record_summary(&mut self, summary: &SessionSummary) -> Result<()>;
}

// === In-memory logger ===

#[derive(Debug, Default)]
struct MemoryLog {
    matches: Vec<MatchRecord>,
    summary: Option<SessionSummary>,
}

/// Logger that keeps records in memory.
///
/// Clones share the same storage, so a clone kept by the caller sees what
/// the session logged through its boxed copy.
#[derive(Clone, Debug, Default)]
pub struct MemoryLogger {
    inner: Rc<RefCell<MemoryLog>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match records received so far.
    #[must_use]
    pub fn matches(&self) -> Vec<MatchRecord> {
        self.inner.borrow().matches.clone()
    }

    /// Session summary, once received.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        self.inner.borrow().summary.clone()
    }
}

impl SessionLogger for MemoryLogger {
    fn record_match(&mut self, record: &MatchRecord) -> Result<()> {
        self.inner.borrow_mut().matches.push(record.clone());
        Ok(())
    }

    fn record_summary(&mut self, summary: &SessionSummary) -> Result<()> {
        self.inner.borrow_mut().summary = Some(summary.clone());
        Ok(())
    }
}

// === File logger ===

/// On-disk encoding of a session summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Bincode,
}

impl LogFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Bincode => "bin",
        }
    }

    /// Format implied by a file extension; unknown extensions read as JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") => LogFormat::Bincode,
            _ => LogFormat::Json,
        }
    }
}

/// Logger that saves the session summary under a log directory.
#[derive(Clone, Debug)]
pub struct FileLogger {
    dir: PathBuf,
    format: LogFormat,
    written: Option<PathBuf>,
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>, format: LogFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            written: None,
        }
    }

    /// Path of the last summary written.
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }

    /// Target path for `summary`.
    #[must_use]
    pub fn path_for(&self, summary: &SessionSummary) -> PathBuf {
        let stamp = summary.started_at.format("%Y%m%d_%H%M%S_%3f");
        self.dir.join(&summary.game).join(format!(
            "{}_{stamp}.{}",
            summary.game,
            self.format.extension()
        ))
    }
}

impl SessionLogger for FileLogger {
    // The summary carries every match; nothing to write per match.
    fn record_match(&mut self, _record: &MatchRecord) -> Result<()> {
        Ok(())
    }

    fn record_summary(&mut self, summary: &SessionSummary) -> Result<()> {
        let path = self.path_for(summary);
        save_summary(&path, summary, self.format)?;
        self.written = Some(path);
        Ok(())
    }
}

/// Write `summary` to `path`, creating parent directories.
pub fn save_summary(path: &Path, summary: &SessionSummary, format: LogFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io("create log directory", e))?;
    }
    let file = File::create(path).map_err(|e| Error::io("create log file", e))?;
    let mut writer = BufWriter::new(file);
    match format {
        LogFormat::Json => serde_json::to_writer_pretty(&mut writer, summary)?,
        LogFormat::Bincode => bincode::serialize_into(&mut writer, summary)?,
    }
    // Dropping a BufWriter discards flush errors.
    writer.flush().map_err(|e| Error::io("flush log file", e))
}

/// Read a summary written by [`save_summary`]; the format follows the
/// file extension.
pub fn load_summary(path: &Path) -> Result<SessionSummary> {
    let file = File::open(path).map_err(|e| Error::io("open log file", e))?;
    let reader = BufReader::new(file);
    let summary = match LogFormat::from_path(path) {
        LogFormat::Json => serde_json::from_reader(reader)?,
        LogFormat::Bincode => bincode::deserialize_from(reader)?,
    };
    Ok(summary)
}
