//! CLI argument definitions.

use std::path::PathBuf;

use amos_cli::logging::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "amos-filter",
    version,
    about = "Check maintenance work packages for document references and revisions",
    long_about = "Check maintenance work packages for document references and revisions.\n\n\
                  Each action step is classified as Valid, N/A, Missing reference,\n\
                  Missing reference type or Missing revision. Rows can be limited\n\
                  to an action date range first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow action text in trace-level row events.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter and classify a work-package CSV export or a folder of them.
    Validate(ValidateArgs),

    /// Classify a single action text and explain the decision.
    Check(CheckArgs),

    /// List the active rule tables.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Work-package CSV export, or a directory of exports to process in turn.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// First action date to keep: YYYY-MM-DD or relative to today (-7d, -1m, -1y).
    #[arg(long = "from", value_name = "DATE", allow_hyphen_values = true)]
    pub from: Option<String>,

    /// Last action date to keep: YYYY-MM-DD or relative to today.
    #[arg(long = "to", value_name = "DATE", allow_hyphen_values = true)]
    pub to: Option<String>,

    /// TOML rules file extending the built-in rule tables.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Output directory (default: next to the input file).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Append one record per work package to this logbook CSV. A directory
    /// holds one logbook_YYYY_MM.csv per month.
    #[arg(long = "logbook", value_name = "PATH")]
    pub logbook: Option<PathBuf>,

    /// Classify and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with status 1 when any row has a missing reference, type or revision.
    #[arg(long = "fail-on-errors")]
    pub fail_on_errors: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Action text to classify.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Task sequence code (e.g. 1.12).
    #[arg(long = "seq", value_name = "SEQ")]
    pub sequence_code: Option<String>,

    /// Section header of the step.
    #[arg(long = "header", value_name = "HEADER")]
    pub header: Option<String>,

    /// TOML rules file extending the built-in rule tables.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// TOML rules file extending the built-in rule tables.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
