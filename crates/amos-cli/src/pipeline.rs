//! Work-package processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Rules**: Build the rule tables, optionally extended by a rules file
//! 2. **Ingest**: Read the CSV export and discover its columns
//! 3. **Filter**: Drop rows outside the file's and the user's date range
//! 4. **Classify**: Assign a documentation status to every kept row
//! 5. **Output**: Write the annotated CSV and the JSON summary
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, trace};

use amos_filter::{DateRangeFilter, resolve_date_expr};
use amos_ingest::{WorkPackage, read_work_package};
use amos_model::{ActionRow, DateRange, ValidationStatus};
use amos_report::{
    FilterSummary, ReportPaths, RunSummary, ValidationStats, write_annotated_csv,
    write_summary_json,
};
use amos_rules::{RuleConfig, RuleTables};
use amos_validate::{Classifier, Decision};

use crate::logging::redact_value;

// ============================================================================
// Stage 1: Rules
// ============================================================================

/// Build the rule tables, from `path` when given.
pub fn load_rules(path: Option<&Path>) -> Result<Arc<RuleTables>> {
    let tables = match path {
        Some(path) => RuleConfig::from_path(path)
            .and_then(|config| config.build())
            .with_context(|| format!("load rules from {}", path.display()))?,
        None => RuleTables::build().context("build default rules")?,
    };
    Ok(Arc::new(tables))
}

// ============================================================================
// Stage 2: Ingest
// ============================================================================

pub fn ingest(path: &Path) -> Result<WorkPackage> {
    read_work_package(path).with_context(|| format!("read work package {}", path.display()))
}

// ============================================================================
// Stage 3: Filter
// ============================================================================

/// Resolve `--from` / `--to` into a user range.
///
/// Relative expressions count from `today`. A missing bound is taken from
/// `fallback` (the file's own range), or left open.
pub fn resolve_user_range(
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
    fallback: Option<DateRange>,
) -> Result<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let start = match from {
        Some(expr) => resolve_date_expr(expr, today).context("resolve --from")?,
        None => fallback.map_or(NaiveDate::MIN, |range| range.start()),
    };
    let end = match to {
        Some(expr) => resolve_date_expr(expr, today).context("resolve --to")?,
        None => fallback.map_or(NaiveDate::MAX, |range| range.end()),
    };
    Ok(Some(DateRange::new(start, end)))
}

/// Result of the filter stage.
#[derive(Debug)]
pub struct FilterResult {
    pub rows: Vec<ActionRow>,
    pub summary: FilterSummary,
}

pub fn filter(package: &WorkPackage, user_range: Option<DateRange>) -> FilterResult {
    let outcome = DateRangeFilter::new(user_range)
        .with_declared_bounds(package.declared_start, package.declared_end)
        .apply(package.rows.clone());
    let summary = FilterSummary::from_outcome(&outcome, user_range);
    if summary.range_disjoint {
        info!(
            user_range = ?user_range,
            file_range = ?summary.file_range,
            "requested range does not overlap the work package"
        );
    }
    FilterResult {
        rows: outcome.kept,
        summary,
    }
}

// ============================================================================
// Stage 4: Classify
// ============================================================================

pub fn classify(classifier: &Classifier, rows: &[ActionRow]) -> Vec<Decision> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let decision = classifier.explain_row(row);
            trace!(
                row = index + 1,
                text = redact_value(row.text.as_deref().unwrap_or("")),
                status = %decision.status,
                step = %decision.step,
                "row classified"
            );
            decision
        })
        .collect()
}

// ============================================================================
// Stage 5: Output
// ============================================================================

pub struct OutputConfig<'a> {
    pub output_dir: &'a Path,
    pub dry_run: bool,
    /// When processing of this work package began.
    pub started: Instant,
}

/// Build the summary and, unless this is a dry run, write both outputs.
pub fn output(
    config: &OutputConfig<'_>,
    package: &WorkPackage,
    filtered: &FilterResult,
    decisions: &[Decision],
) -> Result<(RunSummary, Option<ReportPaths>)> {
    let stem = package.stem();
    let summary = RunSummary {
        work_package: stem.clone(),
        source: package.path.clone(),
        stats: ValidationStats::from_decisions(package.rows.len(), decisions),
        filter: filtered.summary.clone(),
        processing_ms: u64::try_from(config.started.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    if config.dry_run {
        debug!("dry run, skipping output files");
        return Ok((summary, None));
    }

    std::fs::create_dir_all(config.output_dir)
        .with_context(|| format!("create output dir {}", config.output_dir.display()))?;
    let paths = ReportPaths::for_stem(config.output_dir, &stem);
    let statuses: Vec<ValidationStatus> = decisions.iter().map(|d| d.status).collect();
    write_annotated_csv(&paths.annotated, &package.headers, &filtered.rows, &statuses)
        .context("write annotated work package")?;
    write_summary_json(&paths.summary, &summary).context("write summary")?;
    Ok((summary, Some(paths)))
}

/// Default output directory: the input file's directory.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
