//! Command-line argument definitions.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};

use crate::commands::submit::SubmitArgs;

/// What I did: daily worklog reports.
///
/// Reads the day's worklog file, sums the time spent per task and prints the
/// export payload for the timesheet, optionally followed by a table.
#[derive(Debug, Parser)]
#[command(name = "wid", version, about, long_about = None)]
pub struct Cli {
    /// More output: -v adds the table, -vv the detailed dump, -vvv debug logs.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Day to report: YYYYMMDD, -N working days back, or `y` (default: today).
    #[arg(allow_negative_numbers = true)]
    pub day: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parses `std::env::args_os`, exiting with a usage error on failure.
    pub fn parse_checked() -> Self {
        Self::try_parse_checked_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parses `args` and rejects a report day given before a subcommand.
    ///
    /// Subcommands take their own day argument, so `wid 20250129 submit`
    /// would otherwise act on today.
    pub fn try_parse_checked_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        if let (Some(day), Some(_)) = (&cli.day, &cli.command) {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                format!("the day '{day}' must follow the subcommand (e.g. `wid submit {day}`)"),
            ));
        }
        Ok(cli)
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit a day's worklog to the Tempo timesheet.
    Submit(SubmitArgs),
}
