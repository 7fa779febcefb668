//! Core domain logic for wid ("what I did").
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing: turning hand-written worklog lines into entries
//! - Aggregation: grouping entries by task and collapsing them into summaries
//! - Reporting: the export payload, the detailed dump and the workday table
//! - Days: resolving day queries and locating the daily worklog file

pub mod aggregate;
pub mod catalog;
pub mod day;
pub mod entry;
pub mod report;
pub mod worklog;

pub use aggregate::{CollapsedSummary, GroupedRecord, TaskGroup, TaskGroups, collapse, group_by_task};
pub use catalog::TaskCatalog;
pub use day::{DayQuery, DayQueryError};
pub use entry::{ParsedEntry, parse_line};
pub use report::{DayReport, DetailedReport, ExportEntry, ExportPayload, Quota, RenderOptions, Verbosity, render};
pub use worklog::{WorklogError, load_or_create, worklog_path};
