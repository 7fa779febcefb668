//! Worklog line parsing.
//!
//! A worklog line looks like `9.30-10.15 - PROJ-42 - fix login, review PR`:
//! a time range, a task token and an optional free-text description. Lines
//! that do not have this shape are not entries at all; the worklog is edited by
//! hand and stray notes are expected.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

/// Pre-compiled worklog entry pattern.
///
/// The task token is a tracker key (`[A-Za-z]{2,15}-[0-9]{1,6}`) or one of the
/// reserved words `void` and `let`. The task/description separator is either a
/// dash or plain whitespace.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<start_h>[0-9]{1,2})\.(?P<start_m>[0-9]{2})-(?P<end_h>[0-9]{1,2})\.(?P<end_m>[0-9]{2})\s*(?:-\s*)?(?P<task>[a-z]{2,15}-[0-9]{1,6}|void|let)(?:(?:\s*-\s*|\s+)(?P<description>.*?))?\s*$",
    )
    .unwrap()
});

/// One successfully parsed worklog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Task token, uppercased but not yet alias-resolved.
    pub task: String,
    /// Trimmed description; empty when the line has none.
    pub description: String,
}

impl fmt::Display for ParsedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.task
        )?;
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// Parses one worklog line.
///
/// Returns `None` when the line does not match the entry pattern or carries an
/// impossible time of day (e.g. `25.00`).
pub fn parse_line(line: &str) -> Option<ParsedEntry> {
    let caps = ENTRY_RE.captures(line)?;

    let start = time_of_day(&caps["start_h"], &caps["start_m"])?;
    let end = time_of_day(&caps["end_h"], &caps["end_m"])?;
    let description = caps
        .name("description")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(ParsedEntry {
        start,
        end,
        task: caps["task"].to_uppercase(),
        description,
    })
}

fn time_of_day(hour: &str, minute: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_full_line_with_dash_separators() {
        let entry = parse_line("09.00-09.30 - WDDADM-3 - daily sync").unwrap();
        assert_eq!(entry.start, hm(9, 0));
        assert_eq!(entry.end, hm(9, 30));
        assert_eq!(entry.task, "WDDADM-3");
        assert_eq!(entry.description, "daily sync");
    }

    #[test]
    fn parses_void_without_description() {
        let entry = parse_line("09.30-10.15 VOID").unwrap();
        assert_eq!(entry.task, "VOID");
        assert_eq!(entry.description, "");
    }

    #[test]
    fn task_token_is_case_insensitive_and_uppercased() {
        assert_eq!(parse_line("10.00-10.20 let").unwrap().task, "LET");
        assert_eq!(parse_line("10.00-10.20 void").unwrap().task, "VOID");
        assert_eq!(parse_line("10.00-10.20 proj-7 x").unwrap().task, "PROJ-7");
    }

    #[test]
    fn single_digit_hour_is_zero_padded_on_display() {
        let entry = parse_line("9.05-9.50 PP-1 - standup").unwrap();
        assert_eq!(entry.start.format("%H:%M").to_string(), "09:05");
        assert_eq!(entry.end.format("%H:%M").to_string(), "09:50");
        assert_eq!(entry.to_string(), "09:05-09:50 PP-1 standup");
    }

    #[test]
    fn description_is_trimmed() {
        let entry = parse_line("11.00-12.00 PP-1 -   deploy   \r").unwrap();
        assert_eq!(entry.description, "deploy");
    }

    #[test]
    fn whitespace_alone_separates_task_and_description() {
        let entry = parse_line("11.00-12.00 PP-1 deploy to staging").unwrap();
        assert_eq!(entry.task, "PP-1");
        assert_eq!(entry.description, "deploy to staging");
    }

    #[test]
    fn dangling_dash_gives_empty_description() {
        let entry = parse_line("11.00-12.00 PP-1 -").unwrap();
        assert_eq!(entry.description, "");
    }

    #[test]
    fn task_digits_are_not_split_into_description() {
        let entry = parse_line("11.00-12.00 PP-1234").unwrap();
        assert_eq!(entry.task, "PP-1234");
        assert_eq!(entry.description, "");
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "# notes for today",
            "lunch",
            "09:00-09:30 PP-1",
            "09.0-09.30 PP-1",
            "09.00-09.30",
            "09.00-09.30 P-1",
            "09.00-09.30 ABCDEFGHIJKLMNOP-1",
            "09.00-09.30 PP-1234567",
            "09.00-09.30 letter",
            "09.00-09.30 PP-12x",
        ] {
            assert!(parse_line(line).is_none(), "should reject {line:?}");
        }
    }

    #[test]
    fn rejects_impossible_times() {
        assert!(parse_line("25.00-26.00 PP-1").is_none());
        assert!(parse_line("10.60-11.00 PP-1").is_none());
    }
}
