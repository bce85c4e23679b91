//! CLI argument definitions for the record type studio.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rts",
    version,
    about = "Record Type Studio - validate and export record type metadata",
    long_about = "Validate record type and record field uploads (CSV or JSON) against the \
                  workflow, key and field type rules, and export normalised record type \
                  definitions to the flattened partition/row keyed table format."
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

    /// TOML configuration file (default: $RTS_CONFIG, else built-in tables).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a record type upload and a record field upload.
    Validate(ValidateArgs),

    /// Export record type bundles to the flattened table format.
    Export(ExportArgs),

    /// List the field type codes.
    FieldTypes,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Record types file (.csv or .json).
    #[arg(long = "record-types", value_name = "FILE")]
    pub record_types: PathBuf,

    /// Record fields file (.csv or .json).
    #[arg(long = "record-fields", value_name = "FILE")]
    pub record_fields: PathBuf,

    /// Report format.
    #[arg(long = "report", value_enum, default_value = "table")]
    pub report: ReportFormatArg,

    /// Write the report to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also require record type names and prefixes to be unique within the upload.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Bundle file: one record type bundle or an array of them (JSON).
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Which rows to export.
    #[arg(long = "what", value_enum, default_value = "fields")]
    pub what: ExportWhatArg,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: ExportFormatArg,

    /// Output file (default: stdout).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Record type RowKey style (overrides the config file).
    #[arg(long = "row-key-style", value_enum)]
    pub row_key_style: Option<RowKeyStyleArg>,

    /// Skip definition checks before exporting.
    #[arg(long = "no-check")]
    pub no_check: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportWhatArg {
    Fields,
    RecordTypes,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RowKeyStyleArg {
    Name,
    /// Deprecated `"name (prefix)"` keys.
    NameWithPrefix,
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
