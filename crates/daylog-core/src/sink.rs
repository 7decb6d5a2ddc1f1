//! The sink instance: lifecycle, locking, and the public write surface.
//!
//! A [`FileSink`] is one explicitly owned value holding the whole session:
//! the open handle, the adopted configuration, and the failure counters.
//! Every operation serializes on an internal lock held for its full body, so
//! a sink can be shared freely across threads and records land in the order
//! their critical sections were granted.

use std::cell::Cell;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{self, SinkConfig, DEFAULT_DIRECTORY};
use crate::error::{SinkError, SinkResult};
use crate::session::{Appended, FileSession};

/// Counters exposed as the out-of-band reporting channel.
///
/// `write` has no return value, so hosts watch these (and the `daylog`
/// tracing target) to observe failures.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct SinkStats {
    /// Records appended to the active file.
    pub records_written: u64,
    /// Bytes appended.
    pub bytes_written: u64,
    /// Records lost: rotation failures, append failures, or cap overflow
    /// with retention disabled.
    pub records_dropped: u64,
    /// Completed rotation chains.
    pub rotations: u64,
    /// Failed appends and rotations (each also drops its record).
    pub write_failures: u64,
}

#[derive(Default)]
struct SinkState {
    staged_directory: Option<String>,
    session: Option<FileSession>,
    initialized: bool,
    stats: SinkStats,
}

/// A date-stamped, size-rotated log-file sink.
///
/// The active file is `log_<YYYY-MM-DD>.log` under the configured directory;
/// rotated copies are `log_<YYYY-MM-DD>.log.0` (newest) through
/// `.max_retained_files-1` (oldest). Records are appended verbatim; callers
/// frame them, typically with a trailing newline.
pub struct FileSink {
    state: Mutex<SinkState>,
    clock: Arc<dyn Clock>,
}

impl FileSink {
    /// Sink on the local system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Sink on a custom date source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(SinkState::default()),
            clock,
        }
    }

    /// Stage the base directory for the next [`init`](Self::init).
    ///
    /// Overlong paths are rejected and the staged value is left unchanged;
    /// a truncated path would corrupt the rotation chain. Defaults to
    /// `./logs` when never called.
    pub fn set_path(&self, directory: impl Into<String>) -> SinkResult<()> {
        let directory = directory.into();
        config::validate_directory(&directory)?;
        self.state.lock().staged_directory = Some(directory);
        Ok(())
    }

    /// Open the sink: create the directory and today's active file.
    ///
    /// Idempotent: calling it again while initialized is an immediate
    /// success and repeats no filesystem work.
    pub fn init(&self) -> SinkResult<()> {
        let mut state = self.state.lock();
        if state.initialized {
            return Ok(());
        }

        let directory = state
            .staged_directory
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTORY.to_string());
        let config = SinkConfig {
            directory,
            ..SinkConfig::default()
        };

        state.session = Some(FileSession::apply(config, self.clock.as_ref())?);
        state.initialized = true;
        Ok(())
    }

    /// Append one already-formatted record.
    ///
    /// Requires a prior [`init`](Self::init); calling before that is a
    /// programmer error and asserts in debug builds. Failures never
    /// propagate; they are counted in [`stats`](Self::stats) and emitted on
    /// the `daylog` tracing target, because this sink typically backs the
    /// logging pipeline itself.
    pub fn write(&self, record: &[u8]) {
        let mut state = self.state.lock();
        if !state.initialized {
            debug_assert!(false, "FileSink::write before init");
            state.stats.records_dropped += 1;
            drop(state);
            report(|| error!(target: "daylog", "write before init; record dropped"));
            return;
        }

        let SinkState {
            session, stats, ..
        } = &mut *state;
        let session = match session.as_mut() {
            Some(session) => session,
            None => {
                stats.records_dropped += 1;
                return;
            }
        };

        match session.write_record(record, self.clock.as_ref()) {
            Ok(Appended::Written { rotated }) => {
                stats.records_written += 1;
                stats.bytes_written += record.len() as u64;
                if rotated {
                    stats.rotations += 1;
                }
            }
            Ok(Appended::DroppedOverflow) => {
                stats.records_dropped += 1;
                let path = session.active_path().to_path_buf();
                drop(state);
                report(|| {
                    warn!(
                        target: "daylog",
                        path = %path.display(),
                        "size cap exceeded with retention disabled; record dropped"
                    );
                });
            }
            Err(err) => {
                stats.records_dropped += 1;
                stats.write_failures += 1;
                drop(state);
                report(|| error!(target: "daylog", %err, "record dropped"));
            }
        }
    }

    /// Atomically replace the configuration.
    ///
    /// The old handle is closed first; a new one opens only when the
    /// resolved name is non-empty. On error the sink keeps its previous
    /// configuration with the handle closed, and the next write reopens it.
    pub fn configure(&self, config: SinkConfig) -> SinkResult<()> {
        let mut state = self.state.lock();
        if !state.initialized {
            debug_assert!(false, "FileSink::configure before init");
            return Err(SinkError::NotInitialized);
        }

        if let Some(session) = state.session.as_mut() {
            session.close();
        }
        state.session = Some(FileSession::apply(config, self.clock.as_ref())?);
        Ok(())
    }

    /// Close the sink. A later [`init`](Self::init) brings it back.
    pub fn deinit(&self) -> SinkResult<()> {
        let mut state = self.state.lock();
        if !state.initialized {
            debug_assert!(false, "FileSink::deinit before init");
            return Err(SinkError::NotInitialized);
        }

        if let Some(mut session) = state.session.take() {
            session.close();
        }
        state.initialized = false;
        Ok(())
    }

    /// Snapshot of the throughput and failure counters.
    pub fn stats(&self) -> SinkStats {
        self.state.lock().stats
    }

    /// Path the next record will land in, when a file is open.
    pub fn active_path(&self) -> Option<PathBuf> {
        self.state
            .lock()
            .session
            .as_ref()
            .map(|s| s.active_path().to_path_buf())
            .filter(|p| !p.as_os_str().is_empty())
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(session) = self.state.get_mut().session.as_mut() {
            session.close();
        }
    }
}

thread_local! {
    /// The sink may back the very subscriber that receives its failure
    /// events; this flag breaks the resulting recursion.
    static REPORTING: Cell<bool> = Cell::new(false);
}

fn report<F: FnOnce()>(emit: F) {
    REPORTING.with(|flag| {
        if flag.replace(true) {
            return;
        }
        emit();
        flag.set(false);
    });
}
