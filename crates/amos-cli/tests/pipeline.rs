//! Integration tests for the pipeline module.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use amos_cli::batch::{RunOptions, run_batch, run_file};
use amos_cli::pipeline::{
    OutputConfig, classify, default_output_dir, filter, ingest, load_rules, output,
    resolve_user_range,
};
use amos_model::{DateRange, ValidationStatus};
use amos_validate::Classifier;
use chrono::{NaiveDate, NaiveDateTime};

fn temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("amos_cli_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn recorded_at() -> NaiveDateTime {
    date(2025, 10, 23).and_hms_opt(8, 0, 0).unwrap()
}

fn options(logbook: Option<&std::path::Path>) -> RunOptions<'_> {
    RunOptions {
        from: None,
        to: None,
        today: date(2025, 10, 23),
        output_dir: None,
        dry_run: false,
        logbook,
        recorded_at: recorded_at(),
    }
}

const WORK_PACKAGE: &str = "WO,SEQ,wo_text_action.header,wo_text_action.text,action_date,start_date,end_date\n\
    WP7,4.1,INSPECTION,IAW AMM 52-11-01 REV 156,2025-10-02,2025-10-01,2025-10-22\n\
    WP7,4.2,INSPECTION,IAW AMM 52-11-01,2025-10-05,,\n\
    WP7,1.1,,,2025-10-06,,\n\
    WP7,4.3,,INSPECTED PANEL,2025-10-20,,\n\
    WP7,4.4,,IAW SRM 51-10-02 ISSUE 3,2025-10-25,,\n\
    WP7,4.5,,N/A,,,\n";

#[test]
fn test_resolve_user_range_absent() {
    let today = date(2025, 10, 15);
    assert_eq!(resolve_user_range(None, None, today, None).unwrap(), None);
}

#[test]
fn test_resolve_user_range_absolute_and_relative() {
    let today = date(2025, 10, 15);
    let range = resolve_user_range(Some("2025-10-01"), Some("-5d"), today, None)
        .unwrap()
        .unwrap();
    assert_eq!(range, DateRange::new(date(2025, 10, 1), date(2025, 10, 10)));

    let range = resolve_user_range(Some("-1m"), Some("+0d"), today, None)
        .unwrap()
        .unwrap();
    assert_eq!(range, DateRange::new(date(2025, 9, 15), today));
}

#[test]
fn test_resolve_user_range_fills_missing_bound() {
    let today = date(2025, 10, 15);
    let file = DateRange::new(date(2025, 10, 1), date(2025, 10, 22));

    let range = resolve_user_range(Some("2025-10-10"), None, today, Some(file))
        .unwrap()
        .unwrap();
    assert_eq!(range, DateRange::new(date(2025, 10, 10), date(2025, 10, 22)));

    let range = resolve_user_range(None, Some("2025-10-10"), today, None)
        .unwrap()
        .unwrap();
    assert_eq!(range.start(), NaiveDate::MIN);
    assert_eq!(range.end(), date(2025, 10, 10));
}

#[test]
fn test_resolve_user_range_rejects_bad_expression() {
    let today = date(2025, 10, 15);
    let error = resolve_user_range(Some("last week"), None, today, None).unwrap_err();
    assert!(error.to_string().contains("--from"));
}

#[test]
fn test_load_rules_reports_file_path() {
    let dir = temp_dir();
    let path = dir.join("rules.toml");
    fs::write(&path, "[keywords]\nunknown = [\"X\"]\n").unwrap();

    let error = load_rules(Some(&path)).unwrap_err();
    assert!(format!("{error:#}").contains("rules.toml"));

    fs::write(&path, "[keywords]\nreference = [\"ESM\"]\n").unwrap();
    let tables = load_rules(Some(&path)).unwrap();
    assert!(tables.reference_keywords().iter().any(|k| k.code == "ESM"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_pipeline_end_to_end() {
    let dir = temp_dir();
    let input = dir.join("wp7.csv");
    fs::write(&input, WORK_PACKAGE).unwrap();

    let classifier = Classifier::new(load_rules(None).unwrap());
    let package = ingest(&input).unwrap();
    assert_eq!(package.rows.len(), 6);

    let user = DateRange::new(date(2025, 10, 4), date(2025, 10, 31));
    let filtered = filter(&package, Some(user));
    assert_eq!(filtered.summary.kept, 3);
    // undated row and the 2025-10-02 row
    assert_eq!(filtered.summary.removed_before, 2);
    // the 2025-10-25 row, outside the declared range
    assert_eq!(filtered.summary.removed_after, 1);
    assert_eq!(filtered.summary.undated, 1);
    assert_eq!(
        filtered.summary.file_range,
        Some(DateRange::new(date(2025, 10, 1), date(2025, 10, 22)))
    );

    let decisions = classify(&classifier, &filtered.rows);
    let statuses: Vec<ValidationStatus> = decisions.iter().map(|d| d.status).collect();
    assert_eq!(
        statuses,
        vec![
            ValidationStatus::MissingRevision,
            ValidationStatus::Valid,
            ValidationStatus::MissingReference,
        ]
    );

    let config = OutputConfig {
        output_dir: &default_output_dir(&input),
        dry_run: false,
        started: Instant::now(),
    };
    let (summary, paths) = output(&config, &package, &filtered, &decisions).unwrap();
    let paths = paths.expect("files written");
    assert_eq!(summary.work_package, "wp7");
    assert_eq!(summary.stats.orig_rows, 6);
    assert_eq!(summary.stats.out_rows, 3);
    assert_eq!(summary.stats.total_errors, 2);
    assert_eq!(summary.stats.seq_auto_valid, 1);
    assert!(summary.stats.row_mismatch());

    let annotated = fs::read_to_string(&paths.annotated).unwrap();
    let lines: Vec<&str> = annotated.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with(",Reason"));
    assert!(lines[1].ends_with(",Missing revision"));
    assert!(lines[3].ends_with(",Missing reference"));

    let json = fs::read_to_string(&paths.summary).unwrap();
    assert!(json.contains("\"work_package\": \"wp7\""));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = temp_dir();
    let input = dir.join("dry.csv");
    fs::write(&input, WORK_PACKAGE).unwrap();

    let classifier = Classifier::new(load_rules(None).unwrap());
    let package = ingest(&input).unwrap();
    let filtered = filter(&package, None);
    let decisions = classify(&classifier, &filtered.rows);
    let out_dir = dir.join("out");
    let config = OutputConfig {
        output_dir: &out_dir,
        dry_run: true,
        started: Instant::now(),
    };
    let (summary, paths) = output(&config, &package, &filtered, &decisions).unwrap();

    assert!(paths.is_none());
    assert!(!out_dir.exists());
    assert_eq!(summary.stats.out_rows, 4);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_disjoint_user_range_keeps_nothing() {
    let dir = temp_dir();
    let input = dir.join("late.csv");
    fs::write(&input, WORK_PACKAGE).unwrap();

    let package = ingest(&input).unwrap();
    let user = DateRange::new(date(2025, 12, 1), date(2025, 12, 31));
    let filtered = filter(&package, Some(user));

    assert!(filtered.rows.is_empty());
    assert!(filtered.summary.range_disjoint);
    assert_eq!(filtered.summary.total, 6);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_default_output_dir() {
    assert_eq!(
        default_output_dir(std::path::Path::new("exports/wp.csv")),
        PathBuf::from("exports")
    );
    assert_eq!(
        default_output_dir(std::path::Path::new("wp.csv")),
        PathBuf::from(".")
    );
}

#[test]
fn test_run_file_appends_logbook_records_in_order() {
    let dir = temp_dir();
    let first = dir.join("wp1.csv");
    let second = dir.join("wp2.csv");
    fs::write(&first, WORK_PACKAGE).unwrap();
    fs::write(&second, WORK_PACKAGE).unwrap();
    let logbook = dir.join("runs.csv");

    let classifier = Classifier::new(load_rules(None).unwrap());
    let one = run_file(&classifier, &first, &options(Some(logbook.as_path()))).unwrap();
    let two = run_file(&classifier, &second, &options(Some(logbook.as_path()))).unwrap();
    assert_eq!(one.logbook.as_ref().map(|entry| entry.order), Some(1));
    assert_eq!(two.logbook.as_ref().map(|entry| entry.order), Some(2));

    let text = fs::read_to_string(&logbook).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Order,DateTime,WP,"));
    assert!(lines[1].starts_with("1,2025-10-23 08:00:00,wp1,6,"));
    assert!(lines[2].starts_with("2,2025-10-23 08:00:00,wp2,6,"));

    let json = fs::read_to_string(one.paths.unwrap().summary).unwrap();
    assert!(json.contains("\"processing_ms\""));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_dry_run_skips_logbook() {
    let dir = temp_dir();
    let input = dir.join("wp.csv");
    fs::write(&input, WORK_PACKAGE).unwrap();
    let logbook = dir.join("runs.csv");

    let classifier = Classifier::new(load_rules(None).unwrap());
    let options = RunOptions {
        dry_run: true,
        ..options(Some(logbook.as_path()))
    };
    let result = run_file(&classifier, &input, &options).unwrap();
    assert!(result.logbook.is_none());
    assert!(!logbook.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_batch_continues_past_broken_export() {
    let dir = temp_dir();
    fs::write(dir.join("a_good.csv"), WORK_PACKAGE).unwrap();
    fs::write(dir.join("b_broken.csv"), "WO,SEQ,action_date\nWP7,4.1,2025-10-02\n").unwrap();
    fs::write(dir.join("notes.txt"), "not an export").unwrap();

    let classifier = Classifier::new(load_rules(None).unwrap());
    let batch = run_batch(&classifier, &dir, &options(Some(dir.as_path()))).unwrap();

    assert_eq!(batch.runs.len(), 1);
    assert_eq!(batch.runs[0].summary.work_package, "a_good");
    assert!(batch.has_failures());
    assert_eq!(batch.failures.len(), 1);
    assert!(batch.failures[0].path.ends_with("b_broken.csv"));
    let message = format!("{:#}", batch.failures[0].error);
    assert!(message.contains("b_broken.csv"));
    assert!(message.contains("wo_text_action.text"));

    assert!(dir.join("a_good.annotated.csv").exists());
    assert!(dir.join("logbook_2025_10.csv").exists());

    // outputs of the first pass are not picked up as exports
    let again = run_batch(&classifier, &dir, &options(None)).unwrap();
    assert_eq!(again.runs.len(), 1);
    assert_eq!(again.failures.len(), 1);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_batch_rejects_folder_without_exports() {
    let dir = temp_dir();
    fs::write(dir.join("notes.txt"), "not an export").unwrap();

    let classifier = Classifier::new(load_rules(None).unwrap());
    let error = run_batch(&classifier, &dir, &options(None)).unwrap_err();
    assert!(error.to_string().contains("no CSV exports"));
    let _ = fs::remove_dir_all(&dir);
}
