//! Daylog Core Library
//!
//! A log-file sink: persists already-formatted records to disk, bounding
//! disk usage through size-triggered rotation and keeping the active file
//! named for the current calendar day.
//!
//! ## Overview
//!
//! The active file is `log_<YYYY-MM-DD>.log` in the configured directory.
//! When its size crosses the configured cap, the rotation chain shifts
//! `log_<date>.log.n-1` to `log_<date>.log.n` (evicting the oldest copy) and
//! the active name starts fresh. When the calendar date advances, the sink
//! simply opens a file named for the new day; no renaming is involved.
//!
//! Upstream formatting, level filtering, and delivery are someone else's
//! job: this crate only consumes rendered bytes and owns the one mutable
//! external resource, the file handle, under concurrent callers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use daylog_core::{FileSink, SinkConfig};
//!
//! let sink = FileSink::new();
//! sink.set_path("/var/log/myapp")?;
//! sink.init()?;
//!
//! sink.write(b"2026-08-05 12:00:01 INFO ready\n");
//!
//! sink.configure(SinkConfig {
//!     directory: "/var/log/myapp".into(),
//!     max_size_bytes: 1024 * 1024,
//!     max_retained_files: 5,
//!     ..SinkConfig::default()
//! })?;
//!
//! sink.deinit()?;
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod path;
pub mod rotate;
mod session;
pub mod sink;
pub mod writer;

// Re-exports
pub use clock::{Clock, SystemClock};
pub use config::{
    SinkConfig, SyncPolicy, DEFAULT_DIRECTORY, DEFAULT_MAX_RETAINED_FILES, DEFAULT_MAX_SIZE_BYTES,
    MAX_DIRECTORY_LEN,
};
pub use error::{SinkError, SinkResult};
pub use sink::{FileSink, SinkStats};
pub use writer::{SinkMakeWriter, SinkWriter};
