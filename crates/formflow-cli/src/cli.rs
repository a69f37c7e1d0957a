//! CLI argument definitions for the formflow admin tooling.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formflow",
    version,
    about = "Formflow - conditional form dependency analysis",
    long_about = "Analyze conditional audit-form definitions.\n\n\
                  Validates dependency structure (cycles, dangling references),\n\
                  finds unreachable questions, lists delete-blocking dependents,\n\
                  and simulates visibility for an answer snapshot."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the dependency structure of a form snapshot.
    Validate(ValidateArgs),

    /// Report questions that can never become visible.
    Analyze(AnalyzeArgs),

    /// Simulate visibility for a form snapshot and an answer set.
    Preview(PreviewArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the form snapshot JSON file.
    #[arg(value_name = "FORM_FILE")]
    pub form: PathBuf,

    /// Emit the validation report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the form snapshot JSON file.
    #[arg(value_name = "FORM_FILE")]
    pub form: PathBuf,

    /// Also list every question that would be orphaned by deleting or
    /// deactivating the given question.
    #[arg(long = "dependents-of", value_name = "QUESTION_ID")]
    pub dependents_of: Option<String>,

    /// Emit the analysis as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Path to the form snapshot JSON file.
    #[arg(value_name = "FORM_FILE")]
    pub form: PathBuf,

    /// Path to an answers JSON file (array of answer objects). Defaults to
    /// an empty answer set.
    #[arg(long = "answers", value_name = "PATH")]
    pub answers: Option<PathBuf>,

    /// Emit the resolution as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
