//! Work-package CSV reading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use amos_model::{ActionRow, DATE_FORMAT, DateRange};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::columns::{TEXT_COLUMN, WorkPackageColumns, normalize_header};
use crate::error::{IngestError, Result};

/// A loaded work package: source headers plus one row per record.
#[derive(Debug, Clone)]
pub struct WorkPackage {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub columns: WorkPackageColumns,
    pub rows: Vec<ActionRow>,
    /// Bounds declared by the first record's `start_date` / `end_date`.
    pub declared_start: Option<NaiveDate>,
    pub declared_end: Option<NaiveDate>,
}

impl WorkPackage {
    /// Declared range when both bounds are present.
    pub fn declared_range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.declared_start?, self.declared_end?))
    }

    /// File name without extension, used to name outputs.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "work_package".to_string())
    }
}

/// Parse a `YYYY-MM-DD` date, ignoring a trailing time part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Reject UTF-16 input, which the CSV reader would otherwise mangle.
fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> Option<&str> {
    index.and_then(|i| record.get(i))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Read a work-package export.
///
/// Records shorter than the header are padded; empty cells become `None`
/// except for the action text, which is kept verbatim for the classifier.
pub fn read_work_package(path: &Path) -> Result<WorkPackage> {
    validate_encoding(path)?;
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let columns = WorkPackageColumns::discover(&headers).ok_or_else(|| IngestError::MissingColumn {
        column: TEXT_COLUMN,
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), ?columns, "discovered work package columns");
    if columns.action_date.is_none() {
        warn!(path = %path.display(), "no action_date column, rows will be undated");
    }

    let mut rows = Vec::new();
    let mut declared_start = None;
    let mut declared_end = None;
    let mut unparsed_dates = 0usize;

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        if index == 0 {
            declared_start = cell(&record, columns.start_date).and_then(parse_date);
            declared_end = cell(&record, columns.end_date).and_then(parse_date);
        }

        let raw_date = cell(&record, columns.action_date);
        let action_date = raw_date.and_then(parse_date);
        if action_date.is_none() && raw_date.is_some_and(|d| !d.trim().is_empty()) {
            unparsed_dates += 1;
        }

        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        fields.resize(headers.len().max(fields.len()), String::new());

        rows.push(ActionRow {
            text: cell(&record, Some(columns.text)).map(str::to_string),
            sequence_code: non_empty(cell(&record, columns.sequence_code)),
            header: non_empty(cell(&record, columns.header)),
            action_date,
            fields,
        });
    }

    if unparsed_dates > 0 {
        warn!(
            path = %path.display(),
            count = unparsed_dates,
            "action dates not in YYYY-MM-DD format"
        );
    }
    info!(
        path = %path.display(),
        rows = rows.len(),
        columns = headers.len(),
        "loaded work package"
    );

    Ok(WorkPackage {
        path: path.to_path_buf(),
        headers,
        columns,
        rows,
        declared_start,
        declared_end,
    })
}
