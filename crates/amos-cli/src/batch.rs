//! Running the pipeline over one export or a folder of exports.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, info_span, warn};

use amos_ingest::list_work_packages;
use amos_model::{ActionRow, DateRange, Dated};
use amos_report::{append_to_logbook, logbook_path};
use amos_validate::Classifier;

use crate::pipeline::{
    OutputConfig, classify, default_output_dir, filter, ingest, output, resolve_user_range,
};
use crate::types::{BatchFailure, BatchResult, RunResult};

/// Per-run settings shared by every work package of a batch.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
    /// Anchor for relative `--from` / `--to` expressions.
    pub today: NaiveDate,
    /// Output directory; `None` writes next to each input.
    pub output_dir: Option<&'a Path>,
    pub dry_run: bool,
    /// Logbook file, or a directory holding monthly logbooks.
    pub logbook: Option<&'a Path>,
    /// Timestamp recorded in the logbook.
    pub recorded_at: NaiveDateTime,
}

/// Ingest, filter, classify and write outputs for one export.
pub fn run_file(
    classifier: &Classifier,
    input: &Path,
    options: &RunOptions<'_>,
) -> Result<RunResult> {
    let name = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let span = info_span!("work_package", name = %name);
    let _guard = span.enter();
    let started = Instant::now();

    let package = ingest(input)?;

    let fallback = package
        .declared_range()
        .or_else(|| DateRange::spanning(package.rows.iter().filter_map(ActionRow::action_date)));
    let user_range = resolve_user_range(options.from, options.to, options.today, fallback)?;
    let filtered = filter(&package, user_range);

    let decisions = classify(classifier, &filtered.rows);

    let output_dir = options
        .output_dir
        .map_or_else(|| default_output_dir(input), Path::to_path_buf);
    let config = OutputConfig {
        output_dir: &output_dir,
        dry_run: options.dry_run,
        started,
    };
    let (summary, paths) = output(&config, &package, &filtered, &decisions)?;

    let logbook = match options.logbook {
        Some(target) if !options.dry_run => {
            let path = logbook_path(target, options.recorded_at);
            let entry = append_to_logbook(&path, &summary, options.recorded_at)
                .context("update logbook")?;
            Some(entry)
        }
        _ => None,
    };

    info!(
        rows = summary.stats.out_rows,
        errors = summary.stats.total_errors,
        error_rate = summary.stats.error_rate,
        duration_ms = summary.processing_ms,
        "work package validated"
    );
    Ok(RunResult {
        summary,
        paths,
        logbook,
    })
}

/// Run every export in `dir`. A failing export is recorded and the batch
/// moves on to the next one.
pub fn run_batch(
    classifier: &Classifier,
    dir: &Path,
    options: &RunOptions<'_>,
) -> Result<BatchResult> {
    let exports: Vec<_> = list_work_packages(dir)
        .with_context(|| format!("list work packages in {}", dir.display()))?
        .into_iter()
        .filter(|path| !is_generated(path))
        .collect();
    if exports.is_empty() {
        anyhow::bail!("no CSV exports found in {}", dir.display());
    }
    info!(dir = %dir.display(), file_count = exports.len(), "processing batch");

    let mut result = BatchResult::default();
    for path in exports {
        match run_file(classifier, &path, options)
            .with_context(|| format!("process {}", path.display()))
        {
            Ok(run) => result.runs.push(run),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %format!("{error:#}"),
                    "work package failed"
                );
                result.failures.push(BatchFailure { path, error });
            }
        }
    }
    info!(
        succeeded = result.runs.len(),
        failed = result.failures.len(),
        "batch complete"
    );
    Ok(result)
}

/// Annotated copies and monthly logbooks written by earlier runs.
fn is_generated(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            let name = name.to_ascii_lowercase();
            name.ends_with(".annotated.csv") || name.starts_with("logbook_")
        })
}
