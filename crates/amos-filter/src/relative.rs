//! Absolute and relative date expressions for range bounds.
//!
//! Accepted forms are `YYYY-MM-DD` and a signed offset `[+-]N[dmy]`
//! (days, months, years) applied to a base date. Month and year steps keep
//! the day of month where possible and clamp to the month's last day
//! otherwise, so `2024-01-31 +1m` is `2024-02-29`.

use std::sync::LazyLock;

use amos_model::DATE_FORMAT;
use chrono::{Days, Months, NaiveDate};
use regex::Regex;

use crate::error::DateExprError;

static RELATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d+)([dmyDMY])$").expect("valid relative date regex"));

/// Resolve `expr` against `base`.
pub fn resolve_date_expr(expr: &str, base: NaiveDate) -> Result<NaiveDate, DateExprError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(DateExprError::Empty);
    }

    if let Some(caps) = RELATIVE_RE.captures(trimmed) {
        let out_of_range = || DateExprError::OutOfRange {
            expr: trimmed.to_string(),
            base,
        };
        let amount: u32 = caps[2].parse().map_err(|_| out_of_range())?;
        let forward = &caps[1] == "+";
        let resolved = match caps[3].to_ascii_lowercase().as_str() {
            "d" => shift_days(base, u64::from(amount), forward),
            "m" => shift_months(base, amount, forward),
            _ => amount
                .checked_mul(12)
                .and_then(|months| shift_months(base, months, forward)),
        };
        return resolved.ok_or_else(out_of_range);
    }

    if trimmed.len() == 10 && trimmed.as_bytes()[4] == b'-' {
        return NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|source| {
            DateExprError::InvalidDate {
                expr: trimmed.to_string(),
                source,
            }
        });
    }

    Err(DateExprError::Invalid {
        expr: trimmed.to_string(),
    })
}

fn shift_days(base: NaiveDate, days: u64, forward: bool) -> Option<NaiveDate> {
    if forward {
        base.checked_add_days(Days::new(days))
    } else {
        base.checked_sub_days(Days::new(days))
    }
}

fn shift_months(base: NaiveDate, months: u32, forward: bool) -> Option<NaiveDate> {
    if forward {
        base.checked_add_months(Months::new(months))
    } else {
        base.checked_sub_months(Months::new(months))
    }
}
