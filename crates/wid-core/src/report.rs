//! Day reports: the export payload, the detailed dump and the workday table.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::aggregate::{CollapsedSummary, TaskGroups, collapse, group_by_task};
use crate::catalog::TaskCatalog;

/// Regular working day (8 hours).
pub const WORKDAY_MINUTES: i64 = 480;

/// Shortened Friday (7 hours).
pub const FRIDAY_MINUTES: i64 = 420;

const TASK_COLUMN_WIDTH: usize = 9;
const SEPARATOR_WIDTH: usize = 50;

/// How much output to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Export payload only.
    #[default]
    Quiet,
    /// Export payload followed by the workday table.
    Table,
    /// Detailed dump of grouped and collapsed entries first.
    Detailed,
    /// Same output as `Detailed`, with debug diagnostics.
    Trace,
}

impl Verbosity {
    /// Maps the number of `-v` flags to a level; more than three is invalid.
    pub const fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(Self::Quiet),
            1 => Some(Self::Table),
            2 => Some(Self::Detailed),
            3 => Some(Self::Trace),
            _ => None,
        }
    }
}

/// Expected working minutes per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    #[serde(default = "default_workday_minutes")]
    pub workday_minutes: i64,
    #[serde(default = "default_friday_minutes")]
    pub friday_minutes: i64,
}

const fn default_workday_minutes() -> i64 {
    WORKDAY_MINUTES
}

const fn default_friday_minutes() -> i64 {
    FRIDAY_MINUTES
}

impl Default for Quota {
    fn default() -> Self {
        Self {
            workday_minutes: WORKDAY_MINUTES,
            friday_minutes: FRIDAY_MINUTES,
        }
    }
}

impl Quota {
    /// Quota that applies on `date`.
    pub fn minutes_for(&self, date: NaiveDate) -> i64 {
        if date.weekday() == Weekday::Fri {
            self.friday_minutes
        } else {
            self.workday_minutes
        }
    }
}

/// Whole percent of `quota`, rounded down.
pub fn percent_of(total: i64, quota: i64) -> i64 {
    if quota <= 0 {
        return 0;
    }
    (total * 100).div_euclid(quota)
}

/// Payload consumed by the timesheet submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub entries: Vec<ExportEntry>,
    /// Midnight of the reported day, `YYYY-MM-DDTHH:mm:ss.000`.
    pub date: String,
}

/// One task's time for the timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub key: String,
    /// Seconds.
    pub timespent: i64,
    pub comment: String,
}

/// Everything computed for the day, for debugging a worklog.
#[derive(Debug, Serialize)]
pub struct DetailedReport<'a> {
    pub date: String,
    pub entries: &'a TaskGroups,
    pub collapsed_entries: &'a [CollapsedSummary],
}

/// Aggregated worklog of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    pub date: NaiveDate,
    pub groups: TaskGroups,
    pub summaries: Vec<CollapsedSummary>,
}

impl DayReport {
    /// Runs the whole pipeline over the day's worklog lines.
    pub fn build<'a, I>(date: NaiveDate, lines: I, catalog: &TaskCatalog) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let groups = group_by_task(lines, catalog);
        let summaries = collapse(&groups, catalog);
        tracing::debug!(
            date = %date,
            tasks = groups.len(),
            records = groups.record_count(),
            "aggregated worklog"
        );
        Self {
            date,
            groups,
            summaries,
        }
    }

    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload {
            entries: self
                .summaries
                .iter()
                .map(|s| ExportEntry {
                    key: s.task.clone(),
                    timespent: s.interval_minutes * 60,
                    comment: s.description.clone(),
                })
                .collect(),
            date: self.date.format("%Y-%m-%dT00:00:00.000").to_string(),
        }
    }

    pub fn detailed(&self) -> DetailedReport<'_> {
        DetailedReport {
            date: self.date.format("%Y%m%d").to_string(),
            entries: &self.groups,
            collapsed_entries: &self.summaries,
        }
    }

    /// Minutes worked, not counting the void task.
    pub fn total_work_minutes(&self, catalog: &TaskCatalog) -> i64 {
        self.summaries
            .iter()
            .filter(|s| !catalog.is_void(&s.task))
            .map(|s| s.interval_minutes)
            .sum()
    }

    /// Formats the human-readable table with the workday total.
    pub fn table(&self, quota: &Quota, catalog: &TaskCatalog) -> String {
        let mut output = String::new();

        writeln!(output, "{}:", self.date.format("%d %B, %Y (%A)")).unwrap();
        writeln!(output).unwrap();

        for summary in &self.summaries {
            let line = format!(
                "{:<width$} {:>3}m {}",
                summary.task,
                summary.interval_minutes,
                summary.description,
                width = TASK_COLUMN_WIDTH
            );
            writeln!(output, "{}", line.trim_end()).unwrap();
        }

        let total = self.total_work_minutes(catalog);
        let day_quota = quota.minutes_for(self.date);
        writeln!(output).unwrap();
        write!(
            output,
            "Total: {total} / {day_quota} ({}%)",
            percent_of(total, day_quota)
        )
        .unwrap();

        output
    }
}

/// Rendering parameters.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub verbosity: Verbosity,
    pub quota: Quota,
    pub catalog: &'a TaskCatalog,
}

fn separator() -> String {
    format!("\n\n{}\n\n", "-".repeat(SEPARATOR_WIDTH))
}

/// Renders the report for the requested verbosity.
pub fn render(report: &DayReport, options: &RenderOptions<'_>) -> Result<String, serde_json::Error> {
    let mut output = String::new();

    if options.verbosity >= Verbosity::Detailed {
        output.push_str(&serde_json::to_string_pretty(&report.detailed())?);
        output.push_str(&separator());
    }

    output.push_str(&serde_json::to_string_pretty(&report.export_payload())?);

    if options.verbosity >= Verbosity::Table {
        output.push_str(&separator());
        output.push_str(&report.table(&options.quota, options.catalog));
    }

    Ok(output)
}
