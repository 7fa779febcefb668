//! Daily worklog files.
//!
//! One plain-text file per day, named `YYYYMMDD.txt`, edited by hand.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::day::is_weekend;

/// Worklog file errors.
#[derive(Debug, Error)]
pub enum WorklogError {
    /// Nobody works on weekends, so a missing file there is not bootstrapped.
    #[error("worklog file does not exist at \"{}\"; {date} is a weekend day", path.display())]
    WeekendWithoutWorklog { path: PathBuf, date: String },

    /// Reading or creating the file failed.
    #[error("failed to access worklog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Path of the worklog for `date` inside `dir`.
pub fn worklog_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.txt", date.format("%Y%m%d")))
}

/// Reads the worklog for `date`, creating an empty one on working days.
///
/// Bytes that are not valid UTF-8 are replaced, so a damaged line only fails
/// to parse instead of losing the whole day.
pub fn load_or_create(dir: &Path, date: NaiveDate) -> Result<String, WorklogError> {
    let path = worklog_path(dir, date);
    let io_err = |source: io::Error| WorklogError::Io {
        path: path.clone(),
        source,
    };

    match fs::read(&path) {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), "read worklog");
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if is_weekend(date) {
                return Err(WorklogError::WeekendWithoutWorklog {
                    path: path.clone(),
                    date: date.format("%Y%m%d").to_string(),
                });
            }

            fs::create_dir_all(dir).map_err(io_err)?;
            fs::File::create(&path).map_err(io_err)?;
            tracing::info!(path = %path.display(), "created empty worklog");
            Ok(String::new())
        }
        Err(e) => Err(io_err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parse_line;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn path_uses_compact_date() {
        let path = worklog_path(Path::new("/logs"), date(2025, 1, 9));
        assert_eq!(path, Path::new("/logs/20250109.txt"));
    }

    #[test]
    fn reads_existing_worklog() {
        let temp = TempDir::new().unwrap();
        let day = date(2025, 1, 29);
        fs::write(worklog_path(temp.path(), day), "09.00-09.30 PP-1\n").unwrap();

        let contents = load_or_create(temp.path(), day).unwrap();
        assert_eq!(contents, "09.00-09.30 PP-1\n");
    }

    #[test]
    fn invalid_utf8_only_damages_its_line() {
        let temp = TempDir::new().unwrap();
        let day = date(2025, 1, 30);
        fs::write(
            worklog_path(temp.path(), day),
            b"\xff\xfe09.00-09.30 PP-1\n09.00-09.30 PP-3 - ok\n",
        )
        .unwrap();

        let contents = load_or_create(temp.path(), day).unwrap();
        let entries: Vec<_> = contents.lines().filter_map(parse_line).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].task, "PP-3");
        assert_eq!(entries[0].description, "ok");
    }

    #[test]
    fn creates_missing_weekday_worklog() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");
        let day = date(2025, 1, 29);

        let contents = load_or_create(&dir, day).unwrap();
        assert!(contents.is_empty());
        assert!(worklog_path(&dir, day).exists());
    }

    #[test]
    fn refuses_missing_weekend_worklog() {
        let temp = TempDir::new().unwrap();
        let saturday = date(2025, 2, 1);

        let err = load_or_create(temp.path(), saturday).unwrap_err();
        assert!(matches!(err, WorklogError::WeekendWithoutWorklog { .. }));
        assert!(err.to_string().contains("20250201 is a weekend day"));
        assert!(!worklog_path(temp.path(), saturday).exists());
    }

    #[test]
    fn reads_existing_weekend_worklog() {
        let temp = TempDir::new().unwrap();
        let sunday = date(2025, 2, 2);
        fs::write(worklog_path(temp.path(), sunday), "").unwrap();

        assert!(load_or_create(temp.path(), sunday).is_ok());
    }
}
