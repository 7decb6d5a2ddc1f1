//! Active-file name resolution and date-rollover detection.
//!
//! The active file is named for the calendar day it was opened on:
//! `log_2026-08-05.log`. Rotated copies append a numeric suffix, `.0` being
//! the most recently rotated.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::error::{SinkError, SinkResult};

/// File name for a given calendar date, e.g. `log_2026-08-05.log`.
pub fn active_file_name(date: NaiveDate) -> String {
    format!(
        "log_{:04}-{:02}-{:02}.log",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Full path of the active file for `date` under `directory`.
pub fn resolve_active_path(directory: &str, date: NaiveDate) -> PathBuf {
    Path::new(directory).join(active_file_name(date))
}

/// True when the path in use no longer matches the name `date` resolves to.
///
/// Pure predicate; the caller decides whether to swap files.
pub fn date_changed(active_path: &Path, directory: &str, date: NaiveDate) -> bool {
    resolve_active_path(directory, date) != active_path
}

/// Create `directory` (and any missing parents) if it does not exist.
pub fn ensure_directory(directory: &str) -> SinkResult<()> {
    let path = Path::new(directory);
    if !path.is_dir() {
        std::fs::create_dir_all(path).map_err(|source| SinkError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Path of the rotated copy at `index`, e.g. `log_2026-08-05.log.3`.
pub fn rotated_path(active_path: &Path, index: u32) -> PathBuf {
    let mut name = active_path.as_os_str().to_os_string();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}
