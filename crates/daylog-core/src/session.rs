//! File session: exclusive owner of the single open log-file handle.
//!
//! At most one handle is ever open; closing always precedes reopening. The
//! session runs the whole write path (day rollover, size check, rotation,
//! append) but never takes the sink's lock itself: callers hold it for the
//! full critical section.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::config::{SinkConfig, SyncPolicy};
use crate::error::{SinkError, SinkResult};
use crate::path;
use crate::rotate;

/// Outcome of one accepted append, fed into the sink's counters.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Appended {
    /// Record landed; `rotated` is true when a rotation chain ran first.
    Written { rotated: bool },
    /// Size cap exceeded with retention disabled; record intentionally
    /// dropped.
    DroppedOverflow,
}

pub(crate) struct FileSession {
    config: SinkConfig,
    active_path: PathBuf,
    handle: Option<File>,
}

impl FileSession {
    /// Adopt `config`: resolve today's name, make the directory, open the
    /// active file in append/create mode.
    ///
    /// An empty directory yields an inert session with no handle; writes
    /// fail safely until the sink is reconfigured.
    pub(crate) fn apply(config: SinkConfig, clock: &dyn Clock) -> SinkResult<Self> {
        config.validate()?;

        if config.directory.is_empty() {
            return Ok(Self {
                config,
                active_path: PathBuf::new(),
                handle: None,
            });
        }

        path::ensure_directory(&config.directory)?;
        let active_path = path::resolve_active_path(&config.directory, clock.today());
        let handle = Some(open_append(&active_path)?);

        Ok(Self {
            config,
            active_path,
            handle,
        })
    }

    pub(crate) fn active_path(&self) -> &Path {
        &self.active_path
    }

    /// Append one record, rotating or swapping files first when required.
    ///
    /// The caller holds the sink's lock for the duration of this call.
    pub(crate) fn write_record(&mut self, record: &[u8], clock: &dyn Clock) -> SinkResult<Appended> {
        if self.config.directory.is_empty() {
            return Err(SinkError::NoActiveFile);
        }

        // Calendar rollover swaps to a fresh file named for the new day.
        // The previous day's file is left closed and untouched; no rename
        // chain is involved.
        let today = clock.today();
        if path::date_changed(&self.active_path, &self.config.directory, today) {
            self.close();
            self.active_path = path::resolve_active_path(&self.config.directory, today);
        }

        // A failed rotation leaves the handle closed; reopening here is the
        // only retry mechanism.
        if self.handle.is_none() {
            path::ensure_directory(&self.config.directory)?;
            self.handle = Some(open_append(&self.active_path)?);
        }

        // Size check against the file as it exists before this record, so a
        // single oversized record can push the file past the cap until the
        // next write. Downstream tooling relies on that slack.
        let mut rotated = false;
        if self.config.max_size_bytes > 0 {
            let file_size = std::fs::metadata(&self.active_path)
                .map(|m| m.len())
                .unwrap_or(0);
            if file_size > self.config.max_size_bytes {
                if self.config.max_retained_files == 0 {
                    // Retention disabled: the cap becomes a hard stop.
                    return Ok(Appended::DroppedOverflow);
                }
                self.close();
                rotate::rotate(&self.active_path, self.config.max_retained_files)?;
                self.handle = Some(open_append(&self.active_path)?);
                rotated = true;
            }
        }

        if let Some(file) = self.handle.as_mut() {
            file.write_all(record)?;
            if self.config.sync_policy == SyncPolicy::EveryWrite {
                file.sync_data()?;
            }
        }

        Ok(Appended::Written { rotated })
    }

    /// Drop the handle, closing the file. Appends have already reached the
    /// OS, so there is nothing to flush.
    pub(crate) fn close(&mut self) {
        self.handle = None;
    }
}

fn open_append(path: &Path) -> SinkResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
