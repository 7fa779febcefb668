//! Grouping parsed entries by task and collapsing each group into a summary.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::catalog::TaskCatalog;
use crate::entry::parse_line;

/// Splits a description into comma-separated keywords.
static KEYWORD_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

/// Placeholder people write when there is nothing to say.
const PLACEHOLDER: &str = "-";

/// One worklog line attributed to a canonical task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedRecord {
    #[serde(serialize_with = "serialize_hhmm")]
    pub start: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    pub end: NaiveTime,
    #[serde(rename = "interval")]
    pub interval_minutes: i64,
    pub description: String,
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// Whole minutes between two times of the same day, rounded down.
///
/// An `end` earlier than `start` yields a negative interval.
pub fn interval_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    end.signed_duration_since(start)
        .num_seconds()
        .div_euclid(60)
}

/// All records of one task, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup {
    pub task: String,
    pub records: Vec<GroupedRecord>,
}

impl TaskGroup {
    /// Sum of the record intervals.
    pub fn total_minutes(&self) -> i64 {
        self.records.iter().map(|r| r.interval_minutes).sum()
    }
}

/// Records keyed by task, in order of each task's first appearance.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGroups {
    groups: Vec<TaskGroup>,
    index: HashMap<String, usize>,
}

impl TaskGroups {
    /// Appends a record under `task`, creating the group on first use.
    pub fn push(&mut self, task: String, record: GroupedRecord) {
        if let Some(&i) = self.index.get(&task) {
            self.groups[i].records.push(record);
            return;
        }
        self.index.insert(task.clone(), self.groups.len());
        self.groups.push(TaskGroup {
            task,
            records: vec![record],
        });
    }

    pub fn get(&self, task: &str) -> Option<&TaskGroup> {
        self.index.get(task).map(|&i| &self.groups[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskGroup> {
        self.groups.iter()
    }

    /// Number of distinct tasks.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records across all tasks.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

impl<'a> IntoIterator for &'a TaskGroups {
    type Item = &'a TaskGroup;
    type IntoIter = std::slice::Iter<'a, TaskGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for TaskGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.task, &group.records)?;
        }
        map.end()
    }
}

/// Parses worklog lines and groups them by canonical task.
///
/// Lines that are not entries are skipped.
pub fn group_by_task<'a, I>(lines: I, catalog: &TaskCatalog) -> TaskGroups
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups = TaskGroups::default();

    for (line_num, line) in lines.into_iter().enumerate() {
        let Some(entry) = parse_line(line) else {
            if !line.trim().is_empty() {
                tracing::debug!(line = line_num + 1, "skipping line that is not an entry");
            }
            continue;
        };
        tracing::debug!(line = line_num + 1, %entry, "parsed entry");

        let task = catalog.resolve(&entry.task);
        let record = GroupedRecord {
            start: entry.start,
            end: entry.end,
            interval_minutes: interval_minutes(entry.start, entry.end),
            description: entry.description,
        };
        groups.push(task, record);
    }

    groups
}

/// Per-task total for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollapsedSummary {
    pub task: String,
    #[serde(rename = "interval")]
    pub interval_minutes: i64,
    pub description: String,
}

/// Collapses every task group into a single summary, keeping group order.
pub fn collapse(groups: &TaskGroups, catalog: &TaskCatalog) -> Vec<CollapsedSummary> {
    groups
        .iter()
        .map(|group| {
            let description = catalog.typical_description(&group.task).map_or_else(
                || merge_descriptions(&group.records),
                ToString::to_string,
            );
            CollapsedSummary {
                task: group.task.clone(),
                interval_minutes: group.total_minutes(),
                description,
            }
        })
        .collect()
}

/// Unique keywords of all descriptions, first occurrence wins, joined by `", "`.
fn merge_descriptions(records: &[GroupedRecord]) -> String {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for keyword in records
        .iter()
        .flat_map(|r| KEYWORD_SPLIT_RE.split(&r.description))
        .map(str::trim)
    {
        if keyword.is_empty() || keyword == PLACEHOLDER {
            continue;
        }
        if seen.insert(keyword) {
            keywords.push(keyword);
        }
    }

    keywords.join(", ")
}
