//! Tests for amos-model types.

use amos_model::{ActionRow, DateRange, Dated, ValidationStatus};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn status_serializes_as_report_label() {
    let json = serde_json::to_string(&ValidationStatus::MissingReferenceType).unwrap();
    assert_eq!(json, "\"Missing reference type\"");
    let round: ValidationStatus = serde_json::from_str("\"N/A\"").unwrap();
    assert_eq!(round, ValidationStatus::NotApplicable);
}

#[test]
fn row_builder_sets_fields() {
    let row = ActionRow::new("IAW AMM 52-11-01 REV 156")
        .with_sequence_code("9.1")
        .with_header("REMOVAL")
        .with_action_date(date(2025, 10, 15));
    assert_eq!(row.text.as_deref(), Some("IAW AMM 52-11-01 REV 156"));
    assert_eq!(row.sequence_code.as_deref(), Some("9.1"));
    assert_eq!(row.header.as_deref(), Some("REMOVAL"));
    assert_eq!(row.action_date(), Some(date(2025, 10, 15)));
}

#[test]
fn dated_is_implemented_for_plain_dates() {
    let dates = [Some(date(2025, 1, 1)), None];
    assert_eq!(dates[0].action_date(), Some(date(2025, 1, 1)));
    assert_eq!(dates[1].action_date(), None);
    assert_eq!(date(2025, 1, 2).action_date(), Some(date(2025, 1, 2)));
}

#[test]
fn date_range_round_trips_through_json() {
    let range = DateRange::new(date(2025, 10, 1), date(2025, 10, 22));
    let json = serde_json::to_value(range).unwrap();
    assert_eq!(json["start"], "2025-10-01");
    assert_eq!(json["end"], "2025-10-22");
}

#[test]
fn deserialized_range_keeps_bounds_ordered() {
    let range: DateRange =
        serde_json::from_str(r#"{"start":"2025-10-22","end":"2025-10-01"}"#).unwrap();
    assert_eq!(range.start(), date(2025, 10, 1));
    assert_eq!(range.end(), date(2025, 10, 22));
}
