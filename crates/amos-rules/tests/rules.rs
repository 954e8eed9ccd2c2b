use std::fs;
use std::path::PathBuf;

use amos_rules::{RuleConfig, RuleTables, RuleTablesBuilder, RulesError};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("amos_rules_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn names(patterns: &[amos_rules::NamedPattern]) -> Vec<&str> {
    patterns.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn defaults_build() {
    let tables = RuleTables::build().expect("defaults compile");
    assert!(tables.reference_keywords().iter().any(|k| k.code == "AMM"));
    assert!(
        tables
            .reference_keywords()
            .iter()
            .any(|k| k.code == "AD" && k.requires_linking_word)
    );
    assert!(!tables.reference_keywords().iter().any(|k| k.code == "DMC"));
    assert_eq!(tables.linking_words(), ["IAW", "REF", "PER", "I.A.W"]);
    assert!(tables.skip_phrases().iter().any(|p| p == "GET ACCESS"));
    assert!(tables.header_skip_keywords().iter().any(|p| p == "CLOSE UP"));
    assert_eq!(
        names(tables.document_id_patterns()),
        ["data_module_code", "b787_document", "data_module_task"]
    );
    assert_eq!(names(tables.revision_patterns())[0], "revision");
    assert_eq!(
        names(tables.special_patterns()),
        [
            "referenced_document",
            "ndt_report",
            "service_bulletin_number",
            "data_module_task_number",
            "linked_maintenance_program",
            "ndt02_report",
        ]
    );
    assert_eq!(tables.typo_rules().last().map(|r| r.name.as_str()), Some("trim"));
}

#[test]
fn reference_matchers_respect_linking_flag() {
    let tables = RuleTables::build().expect("defaults compile");
    let standalone = tables.reference_pattern().expect("standalone matcher");
    let linked = tables.linked_reference_pattern().expect("linked matcher");

    assert!(standalone.is_match("IAW AMM 52-11-01"));
    assert!(standalone.is_match("checked per srm"));
    assert!(standalone.is_match("SEE NDT MANUAL PART 5"));
    assert!(!standalone.is_match("HAMMER USED"));
    assert!(!standalone.is_match("AD 2020-05-12"));

    assert!(linked.is_match("IAW AD 2020-05-12"));
    assert!(linked.is_match("I.A.W. AD 2020-05-12"));
    assert!(!linked.is_match("AD 2020-05-12"));
    assert!(!linked.is_match("IAW ADHESIVE"));
}

#[test]
fn special_patterns_expand_placeholders() {
    let tables = RuleTables::build().expect("defaults compile");
    let find = |name: &str| {
        tables
            .special_patterns()
            .iter()
            .find(|p| p.name == name)
            .expect("pattern present")
    };
    assert!(find("referenced_document").is_match("REFERENCED AMM"));
    assert!(find("referenced_document").is_match("referenced ndt manual"));
    assert!(find("linked_maintenance_program").is_match("DONE IAW MP"));
    assert!(!find("linked_maintenance_program").is_match("MP ONLY"));
    assert!(find("ndt_report").is_match("NDT REPORT 25-0012"));
    assert!(!find("ndt_report").is_match("NDT REPORT ATTACHED"));
    assert!(find("ndt02_report").is_match("NDT02-251516"));
    assert!(find("service_bulletin_number").is_match("SB B787-A-21-00-0128-02A-933B-D"));
}

#[test]
fn invalid_pattern_names_list_and_entry() {
    let err = RuleTablesBuilder::with_defaults()
        .revision_pattern("broken", r"REV(\d+")
        .build()
        .unwrap_err();
    match err {
        RulesError::InvalidPattern { list, name, .. } => {
            assert_eq!(list, "revision");
            assert_eq!(name, "broken");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rules_file_appends_to_defaults() {
    let path = temp_file(
        "rules.toml",
        r#"
[keywords]
reference = ["esm"]
linked_reference = ["MP"]

[phrases]
skip = ["remove   cover"]

[patterns.revision]
amendment = '\bAMDT\s*\d+\b'
"#,
    );
    let tables = RuleConfig::from_path(&path)
        .expect("parse rules")
        .build()
        .expect("compile rules");

    assert!(tables.reference_keywords().iter().any(|k| k.code == "AMM"));
    assert!(tables.reference_keywords().iter().any(|k| k.code == "ESM"));
    assert!(tables.skip_phrases().iter().any(|p| p == "REMOVE COVER"));
    assert_eq!(names(tables.revision_patterns()).last(), Some(&"amendment"));

    let linked = tables.linked_reference_pattern().expect("linked matcher");
    assert!(linked.is_match("IAW MP"));

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn rules_file_can_replace_defaults() {
    let config: RuleConfig = r#"
replace_defaults = true

[keywords]
reference = ["XYZ"]
linking = ["IAW"]
"#
    .parse()
    .expect("parse rules");
    let tables = config.build().expect("compile rules");
    assert_eq!(tables.reference_keywords().len(), 1);
    assert!(tables.skip_phrases().is_empty());
    assert!(tables.typo_rules().is_empty());
}

#[test]
fn rules_file_errors_carry_path() {
    let path = temp_file("bad.toml", "[keywords]\nunknown = 1\n");
    let err = RuleConfig::from_path(&path).unwrap_err();
    assert!(matches!(err, RulesError::Toml { .. }));
    assert!(err.to_string().contains("bad.toml"));

    let missing = path.with_file_name("missing.toml");
    let err = RuleConfig::from_path(&missing).unwrap_err();
    assert!(matches!(err, RulesError::Io { .. }));

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}
