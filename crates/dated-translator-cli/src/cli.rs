//! CLI argument definitions for the dated term translator.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dated-translator",
    version,
    about = "Translate between paired terms for a point in time",
    long_about = "Translate between paired terms (e.g. an old and a new title) using a CSV \
                  dataset of validity intervals.\n\n\
                  The dataset needs a header row with two term columns and two \
                  YYYY-MM-DD date columns."
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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module path in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the term paired with TERM on DATE.
    Translate(TranslateArgs),

    /// Load a dataset and print a summary.
    Check(DatasetArgs),

    /// List the records of a dataset.
    List(ListArgs),
}

/// Options shared by every command that loads a dataset.
#[derive(Args)]
pub struct DatasetArgs {
    /// Path to the CSV dataset.
    #[arg(short = 'd', long = "dataset", value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// JSON file with lookup options (dataset, term_1_column, ...).
    ///
    /// Flags given on the command line override values from the file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Column holding the first term.
    #[arg(long = "term-1-column", value_name = "NAME")]
    pub term_1_column: Option<String>,

    /// Column holding the second term.
    #[arg(long = "term-2-column", value_name = "NAME")]
    pub term_2_column: Option<String>,

    /// Column holding the first day of each interval.
    #[arg(long = "start-date-column", value_name = "NAME")]
    pub start_date_column: Option<String>,

    /// Column holding the last day of each interval.
    #[arg(long = "end-date-column", value_name = "NAME")]
    pub end_date_column: Option<String>,

    /// Skip rows with bad dates instead of failing.
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Fail when overlapping intervals give different answers.
    #[arg(long = "reject-overlaps")]
    pub reject_overlaps: bool,
}

#[derive(Args)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Known term, from either term column.
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Date to translate for (YYYY-MM-DD).
    #[arg(value_name = "DATE", value_parser = parse_date_arg)]
    pub date: NaiveDate,

    /// Print every matching term instead of the first.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Only list records whose interval contains this date (YYYY-MM-DD).
    #[arg(long = "at", value_name = "DATE", value_parser = parse_date_arg)]
    pub at: Option<NaiveDate>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    dated_translator::parse_date(value).ok_or_else(|| format!("'{value}' is not a YYYY-MM-DD date"))
}
