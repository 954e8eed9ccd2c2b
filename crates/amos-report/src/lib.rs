//! Reporting for classified work packages.
//!
//! - [`ValidationStats`]: per-status counts, decision steps, error rate
//! - [`write_annotated_csv`]: source columns plus a `Reason` column
//! - [`write_summary_json`]: statistics and date filter figures as JSON
//! - [`append_to_logbook`]: one cumulative CSV record per run

mod error;
mod logbook;
mod output;
mod stats;

pub use error::ReportError;
pub use logbook::{LOGBOOK_TIMESTAMP_FORMAT, LogbookEntry, append_to_logbook, logbook_path};
pub use output::{
    FilterSummary, REASON_COLUMN, ReportPaths, RunSummary, write_annotated_csv, write_summary_json,
};
pub use stats::ValidationStats;
