//! Cumulative run logbook: one CSV record per processed work package.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use amos_model::ValidationStatus;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::error::ReportError;
use crate::output::RunSummary;

pub const LOGBOOK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One logbook record. Field order is column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogbookEntry {
    #[serde(rename = "Order")]
    pub order: usize,
    #[serde(rename = "DateTime")]
    pub recorded_at: String,
    #[serde(rename = "WP")]
    pub work_package: String,
    #[serde(rename = "Orig rows")]
    pub orig_rows: usize,
    #[serde(rename = "Out rows")]
    pub out_rows: usize,
    #[serde(rename = "Valid")]
    pub valid: usize,
    #[serde(rename = "N/A")]
    pub not_applicable: usize,
    #[serde(rename = "Missing reference")]
    pub missing_reference: usize,
    #[serde(rename = "Missing reference type")]
    pub missing_reference_type: usize,
    #[serde(rename = "Missing revision")]
    pub missing_revision: usize,
    #[serde(rename = "SEQ auto-valid")]
    pub seq_auto_valid: usize,
    #[serde(rename = "Row mismatch")]
    pub row_mismatch: bool,
    #[serde(rename = "Total errors")]
    pub total_errors: usize,
    #[serde(rename = "Error rate (%)")]
    pub error_rate: f64,
    #[serde(rename = "Processing time (ms)")]
    pub processing_ms: u64,
}

impl LogbookEntry {
    pub fn new(order: usize, summary: &RunSummary, recorded_at: NaiveDateTime) -> Self {
        let stats = &summary.stats;
        Self {
            order,
            recorded_at: recorded_at.format(LOGBOOK_TIMESTAMP_FORMAT).to_string(),
            work_package: summary.work_package.clone(),
            orig_rows: stats.orig_rows,
            out_rows: stats.out_rows,
            valid: stats.count(ValidationStatus::Valid),
            not_applicable: stats.count(ValidationStatus::NotApplicable),
            missing_reference: stats.count(ValidationStatus::MissingReference),
            missing_reference_type: stats.count(ValidationStatus::MissingReferenceType),
            missing_revision: stats.count(ValidationStatus::MissingRevision),
            seq_auto_valid: stats.seq_auto_valid,
            row_mismatch: stats.row_mismatch(),
            total_errors: stats.total_errors,
            error_rate: stats.error_rate,
            processing_ms: summary.processing_ms,
        }
    }
}

/// Resolve `--logbook`: a directory holds one `logbook_YYYY_MM.csv` per
/// month, anything else is used as the file itself.
pub fn logbook_path(target: &Path, at: NaiveDateTime) -> PathBuf {
    if target.is_dir() {
        target.join(format!("logbook_{}.csv", at.format("%Y_%m")))
    } else {
        target.to_path_buf()
    }
}

/// Append one record for `summary`, writing the header only when the file
/// is new or empty. Returns the record written.
pub fn append_to_logbook(
    path: &Path,
    summary: &RunSummary,
    recorded_at: NaiveDateTime,
) -> Result<LogbookEntry, ReportError> {
    let existing = existing_records(path)?;
    let entry = LogbookEntry::new(existing.unwrap_or(0) + 1, summary, recorded_at);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(existing.is_none())
        .from_writer(file);
    writer.serialize(&entry).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        order = entry.order,
        work_package = %entry.work_package,
        "logbook updated"
    );
    Ok(entry)
}

/// Number of records already in the logbook, `None` when it has no header yet.
fn existing_records(path: &Path) -> Result<Option<usize>, ReportError> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() == 0 => return Ok(None),
        Ok(_) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ReportError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }
    let read_error = |source| ReportError::LogbookRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(read_error)?;
    let mut count = 0;
    for record in reader.records() {
        record.map_err(read_error)?;
        count += 1;
    }
    Ok(Some(count))
}
