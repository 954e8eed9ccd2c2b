use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};

use amos_cli::batch::{RunOptions, run_batch, run_file};
use amos_cli::pipeline::load_rules;
use amos_cli::types::ValidateOutcome;
use amos_model::ActionRow;
use amos_rules::RuleTables;
use amos_validate::Classifier;

use crate::cli::{CheckArgs, RulesArgs, ValidateArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell, print_decision};

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateOutcome> {
    let tables = load_rules(args.rules.as_deref())?;
    let classifier = Classifier::new(tables);

    let now = chrono::Local::now().naive_local();
    let options = RunOptions {
        from: args.from.as_deref(),
        to: args.to.as_deref(),
        today: now.date(),
        output_dir: args.output_dir.as_deref(),
        dry_run: args.dry_run,
        logbook: args.logbook.as_deref(),
        recorded_at: now,
    };
    if args.input.is_dir() {
        run_batch(&classifier, &args.input, &options).map(ValidateOutcome::Batch)
    } else {
        run_file(&classifier, &args.input, &options).map(ValidateOutcome::Single)
    }
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let tables = load_rules(args.rules.as_deref())?;
    let classifier = Classifier::new(tables);
    let decision = classifier.explain_row(&ActionRow {
        text: Some(args.text.clone()),
        sequence_code: args.sequence_code.clone(),
        header: args.header.clone(),
        ..ActionRow::default()
    });
    print_decision(&args.text, &classifier.normalize(&args.text), &decision);
    Ok(())
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let tables = load_rules(args.rules.as_deref())?;
    print_keyword_table(&tables);
    print_list_table("Linking words", tables.linking_words());
    print_list_table("Skip phrases", tables.skip_phrases());
    print_list_table("Header skip keywords", tables.header_skip_keywords());
    print_pattern_table(&tables);
    Ok(())
}

fn print_keyword_table(tables: &RuleTables) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Reference keyword"), header_cell("Linking word")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for keyword in tables.reference_keywords() {
        let linked = if keyword.requires_linking_word {
            Cell::new("required")
        } else {
            dim_cell("-")
        };
        table.add_row(vec![Cell::new(&keyword.code), linked]);
    }
    println!("{table}");
}

fn print_list_table(title: &str, entries: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title)]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![Cell::new(entry)]);
    }
    println!("{table}");
}

fn print_pattern_table(tables: &RuleTables) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Name"),
        header_cell("Pattern"),
    ]);
    apply_table_style(&mut table);
    let groups = [
        ("skip", tables.skip_patterns()),
        ("document id", tables.document_id_patterns()),
        ("revision", tables.revision_patterns()),
        ("special", tables.special_patterns()),
    ];
    for (group, patterns) in groups {
        for pattern in patterns {
            table.add_row(vec![
                dim_cell(group),
                Cell::new(&pattern.name),
                Cell::new(pattern.regex.as_str()),
            ]);
        }
    }
    for rule in tables.typo_rules() {
        table.add_row(vec![
            dim_cell("typo"),
            Cell::new(&rule.name),
            Cell::new(format!("{} => {}", rule.regex.as_str(), rule.replacement)),
        ]);
    }
    println!("{table}");
}
