//! Result types shared by the `validate` command and its tests.

use std::path::PathBuf;

use amos_report::{LogbookEntry, ReportPaths, RunSummary};

/// Outcome of `validate` for one work package.
#[derive(Debug)]
pub struct RunResult {
    pub summary: RunSummary,
    pub paths: Option<ReportPaths>,
    /// Record appended to the logbook, when one was requested.
    pub logbook: Option<LogbookEntry>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.summary.stats.total_errors > 0
    }
}

/// A work package the batch could not process.
#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Outcome of `validate` over a directory of exports.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub runs: Vec<RunResult>,
    pub failures: Vec<BatchFailure>,
}

impl BatchResult {
    pub fn has_errors(&self) -> bool {
        self.runs.iter().any(RunResult::has_errors)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Either a single work package or a batch, depending on the input path.
#[derive(Debug)]
pub enum ValidateOutcome {
    Single(RunResult),
    Batch(BatchResult),
}
