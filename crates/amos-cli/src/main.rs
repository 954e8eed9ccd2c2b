//! AMOS work-package documentation validator.

use std::io::{self, IsTerminal};

use amos_cli::logging::{LogConfig, init_logging};
use amos_cli::types::ValidateOutcome;
use anyhow::Result;
use clap::{ColorChoice, Parser};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_check, run_rules, run_validate};
use crate::summary::{print_batch_summary, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match cli.command {
        Command::Validate(args) => run_validate(&args).map(|outcome| match outcome {
            ValidateOutcome::Single(result) => {
                print_summary(&result);
                i32::from(args.fail_on_errors && result.has_errors())
            }
            ValidateOutcome::Batch(batch) => {
                print_batch_summary(&batch);
                i32::from(batch.has_failures() || (args.fail_on_errors && batch.has_errors()))
            }
        }),
        Command::Check(args) => run_check(&args).map(|()| 0),
        Command::Rules(args) => run_rules(&args).map(|()| 0),
    };
    std::process::exit(exit_code(outcome));
}

fn exit_code(outcome: Result<i32>) -> i32 {
    outcome.unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        1
    })
}

/// Flags win over `RUST_LOG`; an explicit `--log-level` wins over `-v`/`-q`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), Into::into);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter,
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
