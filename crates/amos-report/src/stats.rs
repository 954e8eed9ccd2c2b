//! Per-status counts and error rate of a classified batch.

use std::collections::BTreeMap;

use amos_model::ValidationStatus;
use amos_validate::{Decision, DecisionStep};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStats {
    /// Rows read from the source before date filtering.
    pub orig_rows: usize,
    /// Rows classified and written out.
    pub out_rows: usize,
    /// Count per status label, every status present.
    pub statuses: BTreeMap<&'static str, usize>,
    /// Count per decision step that settled a row.
    pub steps: BTreeMap<&'static str, usize>,
    pub seq_auto_valid: usize,
    pub total_errors: usize,
    /// Percentage of output rows with an error status, two decimals.
    pub error_rate: f64,
}

impl ValidationStats {
    pub fn from_decisions(orig_rows: usize, decisions: &[Decision]) -> Self {
        let mut stats = Self {
            orig_rows,
            out_rows: decisions.len(),
            statuses: ValidationStatus::ALL
                .iter()
                .map(|status| (status.label(), 0))
                .collect(),
            ..Self::default()
        };
        for decision in decisions {
            *stats.statuses.entry(decision.status.label()).or_default() += 1;
            *stats.steps.entry(decision.step.label()).or_default() += 1;
            if decision.step == DecisionStep::SequenceCode {
                stats.seq_auto_valid += 1;
            }
            if decision.status.is_error() {
                stats.total_errors += 1;
            }
        }
        stats.error_rate = error_rate(stats.total_errors, stats.out_rows);
        stats
    }

    pub fn count(&self, status: ValidationStatus) -> usize {
        self.statuses.get(status.label()).copied().unwrap_or(0)
    }

    /// True when rows were dropped between input and output.
    pub fn row_mismatch(&self) -> bool {
        self.orig_rows != self.out_rows
    }
}

fn error_rate(errors: usize, rows: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    let rate = errors as f64 / rows as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}
