use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize summary {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read logbook {path}: {source}")]
    LogbookRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{rows} rows but {statuses} statuses")]
    LengthMismatch { rows: usize, statuses: usize },
}
