//! Report command: print the day's export payload and, when asked, the table.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use wid_core::{RenderOptions, Verbosity, render};

use super::util::load_day;
use crate::Config;

/// Runs the report command for `day` relative to the local date.
pub fn run<W: Write>(writer: &mut W, config: &Config, day: Option<&str>, verbosity: Verbosity) -> Result<()> {
    let today = Local::now().date_naive();
    report_day(writer, config, day, verbosity, today)
}

/// Writes the report for `day` resolved against `today`.
pub fn report_day<W: Write>(
    writer: &mut W,
    config: &Config,
    day: Option<&str>,
    verbosity: Verbosity,
    today: NaiveDate,
) -> Result<()> {
    let report = load_day(config, day, today)?;

    let options = RenderOptions {
        verbosity,
        quota: config.quota,
        catalog: &config.tasks,
    };
    let output = render(&report, &options).context("failed to render report")?;
    writeln!(writer, "{output}")?;
    Ok(())
}
