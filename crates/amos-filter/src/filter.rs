use std::cmp::Ordering;
use std::fmt;

use amos_model::{DATE_FORMAT, DateRange, Dated};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// Range produced by clamping a user range to a file range.
///
/// Unlike [`DateRange`] this may be empty (`start > end`), which is how a
/// user range that does not overlap the file at all is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl EffectiveRange {
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Where `date` falls relative to the range. An empty range puts every
    /// date on one side or the other.
    fn position(&self, date: NaiveDate) -> Ordering {
        if date < self.start {
            Ordering::Less
        } else if date > self.end {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    pub fn as_date_range(&self) -> Option<DateRange> {
        (!self.is_empty()).then(|| DateRange::new(self.start, self.end))
    }
}

impl From<DateRange> for EffectiveRange {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

impl fmt::Display for EffectiveRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )?;
        if self.is_empty() {
            f.write_str(" (empty)")?;
        }
        Ok(())
    }
}

/// Clamp `user_range` to `file_range`; without a user range the file range
/// is used as is.
pub fn compute_effective_range(file_range: DateRange, user_range: Option<DateRange>) -> EffectiveRange {
    match user_range {
        None => file_range.into(),
        Some(user) => EffectiveRange {
            start: user.start().max(file_range.start()),
            end: user.end().min(file_range.end()),
        },
    }
}

/// Rows kept by a filter run and how many were dropped on each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome<T> {
    #[serde(skip)]
    pub kept: Vec<T>,
    pub total: usize,
    /// Rows dropped for falling before a range, undated rows included.
    pub removed_before: usize,
    pub removed_after: usize,
    /// Rows without a date; already counted in `removed_before`.
    pub undated: usize,
    /// Intrinsic range of the rows that survived the first stage.
    pub file_range: Option<DateRange>,
    pub effective_range: Option<EffectiveRange>,
}

impl<T> FilterOutcome<T> {
    fn empty() -> Self {
        Self {
            kept: Vec::new(),
            total: 0,
            removed_before: 0,
            removed_after: 0,
            undated: 0,
            file_range: None,
            effective_range: None,
        }
    }

    pub fn removed(&self) -> usize {
        self.removed_before + self.removed_after
    }

    /// True when the requested range had no overlap with the file, as
    /// opposed to the input having no rows.
    pub fn is_range_disjoint(&self) -> bool {
        self.effective_range.is_some_and(|range| range.is_empty())
    }
}

/// Drop rows outside `range`, preserving the order of the rest.
pub fn apply_range<T: Dated>(rows: Vec<T>, range: &EffectiveRange) -> FilterOutcome<T> {
    let mut outcome = FilterOutcome::empty();
    outcome.total = rows.len();
    outcome.effective_range = Some(*range);
    for row in rows {
        match row.action_date().map(|date| range.position(date)) {
            None => {
                outcome.undated += 1;
                outcome.removed_before += 1;
            }
            Some(Ordering::Less) => outcome.removed_before += 1,
            Some(Ordering::Greater) => outcome.removed_after += 1,
            Some(Ordering::Equal) => outcome.kept.push(row),
        }
    }
    outcome
}

/// Two-stage filter over a batch of dated rows.
///
/// Stage one drops rows outside the file's intrinsic range: the declared
/// bounds where the file has them, otherwise the earliest and latest dates
/// present. Stage two clamps the optional user range to what survived and
/// drops rows outside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    declared_start: Option<NaiveDate>,
    declared_end: Option<NaiveDate>,
    user_range: Option<DateRange>,
}

impl DateRangeFilter {
    pub fn new(user_range: Option<DateRange>) -> Self {
        Self {
            user_range,
            ..Self::default()
        }
    }

    /// Use the bounds the file declares for itself. Either side may be
    /// missing; reversed bounds are swapped.
    #[must_use]
    pub fn with_declared_bounds(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(s), Some(e)) if s > e => {
                self.declared_start = Some(e);
                self.declared_end = Some(s);
            }
            _ => {
                self.declared_start = start;
                self.declared_end = end;
            }
        }
        self
    }

    #[must_use]
    pub fn with_declared_range(self, range: DateRange) -> Self {
        self.with_declared_bounds(Some(range.start()), Some(range.end()))
    }

    pub fn user_range(&self) -> Option<DateRange> {
        self.user_range
    }

    pub fn apply<T: Dated>(&self, rows: Vec<T>) -> FilterOutcome<T> {
        let total = rows.len();
        let observed = DateRange::spanning(rows.iter().filter_map(Dated::action_date));

        let intrinsic = match (observed, self.declared_start, self.declared_end) {
            (None, _, _) => None,
            (Some(seen), start, end) => Some(EffectiveRange {
                start: start.unwrap_or(seen.start()),
                end: end.unwrap_or(seen.end()),
            }),
        };
        let Some(intrinsic) = intrinsic else {
            debug!(total, "no dated rows");
            let mut outcome = FilterOutcome::empty();
            outcome.total = total;
            outcome.undated = total;
            outcome.removed_before = total;
            return outcome;
        };

        let stage_one = apply_range(rows, &intrinsic);
        debug!(
            intrinsic = %intrinsic,
            removed_before = stage_one.removed_before,
            removed_after = stage_one.removed_after,
            undated = stage_one.undated,
            "intrinsic date filter"
        );

        let survivors = DateRange::spanning(stage_one.kept.iter().filter_map(Dated::action_date));
        let file_range = survivors.map(|seen| {
            DateRange::new(
                self.declared_start.unwrap_or(seen.start()),
                self.declared_end.unwrap_or(seen.end()),
            )
        });

        let Some(file_range) = file_range else {
            return FilterOutcome {
                total,
                effective_range: None,
                ..stage_one
            };
        };

        let effective = compute_effective_range(file_range, self.user_range);
        let stage_two = apply_range(stage_one.kept, &effective);

        let outcome = FilterOutcome {
            kept: stage_two.kept,
            total,
            removed_before: stage_one.removed_before + stage_two.removed_before,
            removed_after: stage_one.removed_after + stage_two.removed_after,
            undated: stage_one.undated,
            file_range: Some(file_range),
            effective_range: Some(effective),
        };
        info!(
            total,
            kept = outcome.kept.len(),
            removed_before = outcome.removed_before,
            removed_after = outcome.removed_after,
            file_range = %file_range,
            effective_range = %effective,
            "date filter applied"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn clamps_user_range_to_file() {
        let file = DateRange::new(date(2025, 10, 1), date(2025, 10, 22));
        let user = DateRange::new(date(2025, 9, 1), date(2025, 11, 1));
        let effective = compute_effective_range(file, Some(user));
        assert_eq!(effective, EffectiveRange::from(file));
        assert_eq!(compute_effective_range(file, None), EffectiveRange::from(file));
    }

    #[test]
    fn disjoint_user_range_is_empty() {
        let file = DateRange::new(date(2025, 10, 1), date(2025, 10, 22));
        let user = DateRange::new(date(2025, 11, 1), date(2025, 11, 30));
        let effective = compute_effective_range(file, Some(user));
        assert!(effective.is_empty());
        assert!(effective.as_date_range().is_none());
        assert!(effective.to_string().ends_with("(empty)"));
    }

    #[test]
    fn apply_range_counts_undated_before() {
        let range = EffectiveRange::from(DateRange::new(date(2025, 10, 1), date(2025, 10, 2)));
        let rows = vec![
            Some(date(2025, 9, 30)),
            None,
            Some(date(2025, 10, 1)),
            Some(date(2025, 10, 3)),
        ];
        let outcome = apply_range(rows, &range);
        assert_eq!(outcome.kept, vec![Some(date(2025, 10, 1))]);
        assert_eq!(outcome.removed_before, 2);
        assert_eq!(outcome.undated, 1);
        assert_eq!(outcome.removed_after, 1);
    }
}
