//! Shared utilities for CLI commands.

use anyhow::Result;
use chrono::NaiveDate;
use wid_core::{DayQuery, DayReport, load_or_create};

use crate::Config;

/// Resolves the day query and aggregates that day's worklog.
///
/// A missing worklog is created empty on working days; on weekends this fails.
pub fn load_day(config: &Config, query: Option<&str>, today: NaiveDate) -> Result<DayReport> {
    let date = DayQuery::parse(query)?.resolve(today);
    tracing::debug!(%date, "resolved day");

    let contents = load_or_create(&config.worklog_dir, date)?;
    Ok(DayReport::build(date, contents.lines(), &config.tasks))
}
