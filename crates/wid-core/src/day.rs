//! Resolving which day a report is for.

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use thiserror::Error;

/// Day query errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DayQueryError {
    /// Eight digits that do not form a calendar date.
    #[error("invalid date: {query} (expected YYYYMMDD)")]
    InvalidDate { query: String },
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayQuery {
    /// No query, or one that is not understood.
    #[default]
    Today,
    /// A concrete `YYYYMMDD` date.
    Absolute(NaiveDate),
    /// `-N` (or `y` for one): N working days back.
    WeekdaysAgo(u32),
}

impl FromStr for DayQuery {
    type Err = DayQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
            return NaiveDate::parse_from_str(s, "%Y%m%d")
                .map(Self::Absolute)
                .map_err(|_| DayQueryError::InvalidDate {
                    query: s.to_string(),
                });
        }

        if s.eq_ignore_ascii_case("y") {
            return Ok(Self::WeekdaysAgo(1));
        }

        if let Some(n) = s.strip_prefix('-').and_then(parse_offset) {
            return Ok(Self::WeekdaysAgo(n));
        }

        if !s.is_empty() {
            tracing::warn!(query = s, "unrecognized day query, using today");
        }
        Ok(Self::Today)
    }
}

/// One to four digits.
fn parse_offset(digits: &str) -> Option<u32> {
    if !(1..=4).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl DayQuery {
    /// Parses an optional command-line argument.
    pub fn parse(query: Option<&str>) -> Result<Self, DayQueryError> {
        query.map_or(Ok(Self::Today), str::parse::<Self>)
    }

    /// Resolves the query against `today`.
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Absolute(date) => date,
            Self::WeekdaysAgo(n) => weekdays_before(today, n),
        }
    }
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Steps back from `date` until `n` working days have been passed.
pub fn weekdays_before(date: NaiveDate, n: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = n;
    while remaining > 0 {
        let Some(previous) = current.checked_sub_days(Days::new(1)) else {
            break;
        };
        current = previous;
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}
