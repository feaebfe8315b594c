//! Archival of completed runs.
//!
//! A record is written only after the pipeline has returned; sinks report
//! success or failure through [`ArchiveOutcome`] and never panic.

use super::traits::ArchivalSink;
use crate::domain::{ConcentrationVector, RecipeInputs, RecipeResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub crop_name: String,
    pub timestamp: String,
    pub targets: ConcentrationVector,
    pub analysis: ConcentrationVector,
    pub final_drip: ConcentrationVector,
    pub target_ec: f64,
}

impl ArchiveRecord {
    pub fn new(
        crop_name: impl Into<String>,
        timestamp: DateTime<Utc>,
        inputs: &RecipeInputs,
        result: &RecipeResult,
    ) -> Self {
        Self {
            crop_name: crop_name.into(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            targets: inputs.target,
            analysis: inputs.analysis,
            final_drip: result.final_drip,
            target_ec: inputs.target_ec,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub success: bool,
    pub message: String,
}

impl ArchiveOutcome {
    pub fn stored(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Appends one JSON document per run to a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonLinesArchive {
    path: PathBuf,
}

impl JsonLinesArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &ArchiveRecord) -> Result<(), String> {
        let line = serde_json::to_string(record)
            .map_err(|source| format!("failed to encode archive record: {source}"))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| {
                format!(
                    "failed to open archive '{}': {}",
                    self.path.display(),
                    source
                )
            })?;
        writeln!(file, "{line}").map_err(|source| {
            format!(
                "failed to append to archive '{}': {}",
                self.path.display(),
                source
            )
        })
    }
}

impl ArchivalSink for JsonLinesArchive {
    fn archive(&self, record: &ArchiveRecord) -> ArchiveOutcome {
        match self.append(record) {
            Ok(()) => ArchiveOutcome::stored(format!(
                "archived '{}' run at {} to '{}'",
                record.crop_name,
                record.timestamp,
                self.path.display()
            )),
            Err(message) => {
                tracing::warn!(path = %self.path.display(), %message, "archival failed");
                ArchiveOutcome::failure(message)
            }
        }
    }
}

/// Keeps records in memory; useful when the caller wants to inspect them.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    records: Mutex<Vec<ArchiveRecord>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ArchiveRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ArchivalSink for MemoryArchive {
    fn archive(&self, record: &ArchiveRecord) -> ArchiveOutcome {
        match self.records.lock() {
            Ok(mut records) => {
                records.push(record.clone());
                ArchiveOutcome::stored(format!("{} records held in memory", records.len()))
            }
            Err(_) => ArchiveOutcome::failure("in-memory archive is poisoned"),
        }
    }
}
