use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DateRangeError;

/// Date format used for action dates and range bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of calendar dates with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Deserialization shape; bounds are reordered on conversion.
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Build a range from two bounds, swapping them when given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A range covering a single day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Parse both bounds as `YYYY-MM-DD`.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Ok(Self::new(parse_bound(start)?, parse_bound(end)?))
    }

    /// Smallest range covering every date yielded, or `None` when empty.
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |acc, date| match acc {
            None => Some(Self::single(date)),
            Some(range) => Some(Self {
                start: range.start.min(date),
                end: range.end.max(date),
            }),
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true when `date` lies within the range (bounds included).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, bounds included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

fn parse_bound(raw: &str) -> Result<NaiveDate, DateRangeError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|source| DateRangeError::InvalidBound {
        value: trimmed.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let range = DateRange::new(date(2025, 10, 22), date(2025, 10, 1));
        assert_eq!(range.start(), date(2025, 10, 1));
        assert_eq!(range.end(), date(2025, 10, 22));
        assert_eq!(range.days(), 22);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(DateRange::parse("2025-10-01", "2025-10-22").is_ok());
        let err = DateRange::parse("2025-10-01", "22/10/2025").unwrap_err();
        assert!(err.to_string().contains("22/10/2025"));
    }

    #[test]
    fn spanning_covers_min_and_max() {
        let range = DateRange::spanning([date(2025, 10, 5), date(2025, 9, 30), date(2025, 10, 2)])
            .expect("non-empty");
        assert_eq!(range, DateRange::new(date(2025, 9, 30), date(2025, 10, 5)));
        assert!(DateRange::spanning(std::iter::empty()).is_none());
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::new(date(2025, 10, 1), date(2025, 10, 22));
        assert!(range.contains(date(2025, 10, 1)));
        assert!(range.contains(date(2025, 10, 22)));
        assert!(!range.contains(date(2025, 10, 23)));
        assert_eq!(range.to_string(), "2025-10-01 .. 2025-10-22");
    }
}
