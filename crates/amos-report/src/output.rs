//! Writers for the annotated work package and its JSON summary.

use std::fs;
use std::path::{Path, PathBuf};

use amos_filter::{EffectiveRange, FilterOutcome};
use amos_model::{ActionRow, DateRange, ValidationStatus};
use serde::Serialize;
use tracing::info;

use crate::error::ReportError;
use crate::stats::ValidationStats;

/// Column appended to the source columns in the annotated output.
pub const REASON_COLUMN: &str = "Reason";

/// Date filter figures carried into the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub total: usize,
    pub kept: usize,
    pub removed_before: usize,
    pub removed_after: usize,
    pub undated: usize,
    pub user_range: Option<DateRange>,
    pub file_range: Option<DateRange>,
    pub effective_range: Option<EffectiveRange>,
    pub range_disjoint: bool,
}

impl FilterSummary {
    pub fn from_outcome<T>(outcome: &FilterOutcome<T>, user_range: Option<DateRange>) -> Self {
        Self {
            total: outcome.total,
            kept: outcome.kept.len(),
            removed_before: outcome.removed_before,
            removed_after: outcome.removed_after,
            undated: outcome.undated,
            user_range,
            file_range: outcome.file_range,
            effective_range: outcome.effective_range,
            range_disjoint: outcome.is_range_disjoint(),
        }
    }
}

/// Contents of `<name>.summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub work_package: String,
    pub source: PathBuf,
    pub stats: ValidationStats,
    pub filter: FilterSummary,
    /// Wall time from reading the export to building this summary.
    pub processing_ms: u64,
}

/// Paths written for one work package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub annotated: PathBuf,
    pub summary: PathBuf,
}

impl ReportPaths {
    pub fn for_stem(output_dir: &Path, stem: &str) -> Self {
        Self {
            annotated: output_dir.join(format!("{stem}.annotated.csv")),
            summary: output_dir.join(format!("{stem}.summary.json")),
        }
    }
}

/// Write the source columns of each row followed by its status label.
pub fn write_annotated_csv(
    path: &Path,
    headers: &[String],
    rows: &[ActionRow],
    statuses: &[ValidationStatus],
) -> Result<(), ReportError> {
    if rows.len() != statuses.len() {
        return Err(ReportError::LengthMismatch {
            rows: rows.len(),
            statuses: statuses.len(),
        });
    }
    let csv_error = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    writer
        .write_record(headers.iter().map(String::as_str).chain([REASON_COLUMN]))
        .map_err(csv_error)?;
    for (row, status) in rows.iter().zip(statuses) {
        // Short records are padded and long ones cut, so the status always
        // lands under `Reason`.
        let mut fields: Vec<&str> = row.fields.iter().map(String::as_str).collect();
        fields.resize(headers.len(), "");
        fields.push(status.label());
        writer.write_record(&fields).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = rows.len(), "wrote annotated work package");
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(summary).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote summary");
    Ok(())
}
