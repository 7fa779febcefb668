//! Submit a day's export payload to the Tempo timesheet.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clap::Args;
use wid_core::ExportPayload;
use wid_tempo::{Client, SubmissionOutcome, submit_payload};

use super::util::load_day;
use crate::Config;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Day to submit: YYYYMMDD, -N working days back, or `y` (default: today).
    #[arg(allow_negative_numbers = true)]
    pub day: Option<String>,

    /// Read the export payload from a file instead (`-` for stdin).
    #[arg(long, conflicts_with = "day")]
    pub payload: Option<PathBuf>,
}

pub fn run<W: Write>(writer: &mut W, args: &SubmitArgs, config: &Config) -> Result<()> {
    let username = config
        .tempo
        .username
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            anyhow!("missing Tempo username (set WID_TEMPO__USERNAME or tempo.username in config.toml)")
        })?;

    let payload = match &args.payload {
        Some(path) => read_payload(path)?,
        None => load_day(config, args.day.as_deref(), Local::now().date_naive())?.export_payload(),
    };
    if payload.entries.is_empty() {
        writeln!(writer, "Nothing to submit for {}.", payload.date)?;
        return Ok(());
    }

    let client = Client::new(config.tempo.base_url.as_str(), username)
        .context("failed to create Tempo client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let void = config.tasks.void.as_str();
    let outcomes = runtime.block_on(submit_payload(&client, &payload, |entry| entry.key == void));

    write_outcomes(writer, &outcomes)?;
    Ok(())
}

/// Reads an export payload as printed by the report command.
fn read_payload(path: &Path) -> Result<ExportPayload> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read payload {}", path.display()))?
    };

    serde_json::from_str(&contents).context("invalid export payload")
}

fn write_outcomes<W: Write>(writer: &mut W, outcomes: &[SubmissionOutcome]) -> Result<()> {
    let mut submitted = 0;
    for outcome in outcomes {
        let minutes = outcome.timespent / 60;
        match &outcome.result {
            Ok(()) => {
                submitted += 1;
                writeln!(writer, "{:<9} {minutes:>3}m submitted", outcome.key)?;
            }
            Err(e) => writeln!(writer, "{:<9} {minutes:>3}m FAILED: {e}", outcome.key)?,
        }
    }
    writeln!(writer)?;
    writeln!(writer, "Submitted {submitted} of {} entries.", outcomes.len())?;
    Ok(())
}
