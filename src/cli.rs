// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Parse failures are not reported the clap way: anything that is not
//! `--help`/`--version` becomes the one-line usage error with exit status 1.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

/// One-line usage message printed on any argument error.
pub const USAGE: &str = "usage: mexec [FILE]";

/// Command-line arguments for `mexec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mexec",
    version,
    about = "Run the command lines of FILE (or stdin) as a single pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// File holding one command per line. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace). Default: warn.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the planned pipeline without creating channels or spawning.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Result of looking at the raw command line.
#[derive(Debug)]
pub enum ParseOutcome {
    Run(CliArgs),
    /// `--help` or `--version`: clap prints it and exits 0.
    Display(clap::Error),
    Usage(clap::Error),
}

/// Parse the given arguments (first item is the program name).
pub fn parse_from<I, T>(args: I) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match CliArgs::try_parse_from(args) {
        Ok(args) => ParseOutcome::Run(args),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParseOutcome::Display(err),
            _ => ParseOutcome::Usage(err),
        },
    }
}

/// Convenience wrapper around [`parse_from`] for the process arguments.
pub fn parse() -> ParseOutcome {
    parse_from(std::env::args_os())
}
