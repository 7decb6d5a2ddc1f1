//! Error types for the daylog sink.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for sink operations.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Operation requires a successful `init` first
    #[error("sink is not initialized")]
    NotInitialized,

    /// Directory path exceeds the fixed storage bound
    #[error("directory path is {len} bytes, the limit is {max}")]
    PathTooLong { len: usize, max: usize },

    /// Log directory could not be created
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A step of the rotation rename chain failed
    #[error("rotation failed at {}: {source}", .path.display())]
    Rotation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No active file is open (empty directory configured)
    #[error("no active log file; reconfigure with a valid directory")]
    NoActiveFile,

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using SinkError
pub type SinkResult<T> = Result<T, SinkError>;
