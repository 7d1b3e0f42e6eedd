//! CLI argument definitions for the save-file viewer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "substrate-dump",
    version,
    about = "Inspect cell-simulation substrate save files",
    long_about = "Decode a substrate save file and print its environment settings,\n\
                  cells (with links and genes) and food particles.\n\n\
                  A FILE without an extension gets `.substrate` appended."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Print every decoded record.
    Show(ShowArgs),

    /// Print a one-table overview of the file.
    Summary(FileArgs),

    /// Write the inflated genome payload to a side file.
    DumpPayload(DumpPayloadArgs),
}

#[derive(Parser)]
pub struct FileArgs {
    /// Save file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Save file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Include reserved fields.
    #[arg(long = "debug")]
    pub debug: bool,

    /// Pause after each cell in text output; Enter continues, `q` stops.
    #[arg(long = "step")]
    pub step: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: ShowFormatArg,

    /// Also write the inflated genome payload to PATH.
    #[arg(long = "dump-payload", value_name = "PATH")]
    pub dump_payload: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DumpPayloadArgs {
    /// Save file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output path (default: FILE with extension `genome.bin`).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormatArg {
    Text,
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
