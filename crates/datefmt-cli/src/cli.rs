//! CLI argument definitions for the pattern inference tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "datefmt",
    version,
    about = "Infer date/time format patterns from sample strings",
    long_about = "Infer the format pattern that parses a date/time string.\n\n\
                  Patterns are emitted in a fixed-width legacy dialect and a flexible\n\
                  modern dialect with optional fractions and zone suffixes."
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

    /// Allow raw input values to appear in logs.
    #[arg(long = "log-values", global = true)]
    pub log_values: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Infer patterns for date/time strings.
    Infer(InferArgs),

    /// Bind a modern pattern and parse strings with it.
    Parse(ParseArgs),

    /// List the recognised input shapes.
    Shapes(ShapesArgs),
}

#[derive(Parser)]
pub struct InferArgs {
    /// Values to infer patterns for.
    #[arg(value_name = "VALUES")]
    pub values: Vec<String>,

    /// Read additional values from a file, one per line (`-` for stdin).
    #[arg(long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Pattern dialect(s) to emit.
    #[arg(long = "dialect", value_enum, default_value = "both")]
    pub dialect: DialectArg,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Modern-dialect pattern, e.g. `y-M-d H:m:s[.SSS][.SS][.S]`.
    #[arg(long = "pattern", short = 'p', value_name = "PATTERN")]
    pub pattern: String,

    /// Values to parse.
    #[arg(value_name = "VALUES")]
    pub values: Vec<String>,

    /// Read additional values from a file, one per line (`-` for stdin).
    #[arg(long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShapesArgs {
    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI dialect choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum DialectArg {
    Legacy,
    Modern,
    Both,
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
