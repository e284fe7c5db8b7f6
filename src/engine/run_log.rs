//! Append-only audit log of simulation runs.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::{Impact, Scenario, SimulationParams};

/// One logged run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Scenario tag.
    pub scenario: Scenario,
    /// Request as submitted.
    pub params: serde_json::Value,
    /// Computed impact.
    pub impact: serde_json::Value,
    /// When the run completed.
    pub timestamp: DateTime<Utc>,
}

impl RunRecord {
    /// Captures a finished run, stamped now.
    pub fn new(params: &SimulationParams, impact: &Impact) -> Result<Self> {
        Ok(Self {
            scenario: params.scenario(),
            params: serde_json::to_value(params)?,
            impact: serde_json::to_value(impact)?,
            timestamp: Utc::now(),
        })
    }
}

/// Durable sink for run records.
///
/// `append` must not return until the record is stored, so a failed write
/// fails the run.
pub trait RunLogger: Send + Sync {
    /// Stores one record.
    fn append(&self, record: RunRecord) -> Result<()>;
}

/// In-process run log.
#[derive(Debug, Default)]
pub struct MemoryRunLog {
    records: Mutex<Vec<RunRecord>>,
}

impl MemoryRunLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in append order.
    pub fn records(&self) -> Vec<RunRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RunLogger for MemoryRunLog {
    fn append(&self, record: RunRecord) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| EngineError::run_log("memory log lock poisoned"))?
            .push(record);
        Ok(())
    }
}

/// File-backed run log, one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesRunLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesRunLog {
    /// Logs to `path`, creating the file on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record back, skipping blank lines.
    pub fn read_all(&self) -> Result<Vec<RunRecord>> {
        let file = File::open(&self.path)?;
        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }

    fn failure(&self, e: std::io::Error) -> EngineError {
        EngineError::run_log(format!("{}: {e}", self.path.display()))
    }
}

impl RunLogger for JsonLinesRunLog {
    fn append(&self, record: RunRecord) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| EngineError::run_log("json log lock poisoned"))?;
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.failure(e))?;
        file.write_all(line.as_bytes()).map_err(|e| self.failure(e))?;
        file.sync_data().map_err(|e| self.failure(e))
    }
}
