//! Sink configuration: target directory, size cap, retention, durability.

use serde::{Deserialize, Serialize};

use crate::error::{SinkError, SinkResult};

/// Longest accepted directory path, in bytes.
pub const MAX_DIRECTORY_LEN: usize = 255;

/// Directory used when the host never stages one.
pub const DEFAULT_DIRECTORY: &str = "./logs";

/// Default rotation threshold: 5 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Default number of rotated copies kept.
pub const DEFAULT_MAX_RETAINED_FILES: u32 = 10;

/// When appended records are forced to stable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SyncPolicy {
    /// Leave durability to the OS (default).
    #[default]
    Never,
    /// `sync_data` after every append.
    EveryWrite,
}

/// Configuration adopted by [`crate::FileSink::configure`].
///
/// `init` builds one of these from the staged directory and the defaults
/// below; later changes go through `configure`, which closes and reopens the
/// handle as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Target folder for the active file and its rotated copies. An empty
    /// string leaves the sink with no open file until reconfigured.
    pub directory: String,

    /// Rotation threshold. `0` disables size-based rotation entirely: the
    /// active file grows without bound.
    pub max_size_bytes: u64,

    /// Historical rotated copies to keep. `0` with a nonzero cap degrades
    /// rotation to drop-on-overflow: once the active file exceeds the cap,
    /// records are dropped (and counted) until reconfigured.
    pub max_retained_files: u32,

    /// Durability policy applied after each append.
    pub sync_policy: SyncPolicy,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.to_string(),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_retained_files: DEFAULT_MAX_RETAINED_FILES,
            sync_policy: SyncPolicy::Never,
        }
    }
}

impl SinkConfig {
    /// Reject configurations whose directory overflows the fixed path bound.
    pub fn validate(&self) -> SinkResult<()> {
        validate_directory(&self.directory)
    }
}

/// Length check shared by `set_path` and `configure`. Overlong paths are an
/// error, never a truncation: a truncated path would silently break the
/// rotation chain's suffix matching.
pub(crate) fn validate_directory(directory: &str) -> SinkResult<()> {
    if directory.len() > MAX_DIRECTORY_LEN {
        return Err(SinkError::PathTooLong {
            len: directory.len(),
            max: MAX_DIRECTORY_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SinkConfig::default();
        assert_eq!(config.directory, "./logs");
        assert_eq!(config.max_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.max_retained_files, 10);
        assert_eq!(config.sync_policy, SyncPolicy::Never);
    }

    #[test]
    fn test_directory_length_boundary() {
        assert!(validate_directory(&"d".repeat(MAX_DIRECTORY_LEN)).is_ok());

        let err = validate_directory(&"d".repeat(MAX_DIRECTORY_LEN + 1)).unwrap_err();
        assert!(matches!(err, SinkError::PathTooLong { len: 256, max: 255 }));
    }

    #[test]
    fn test_empty_directory_is_accepted() {
        // Empty means "no active file", not an error.
        let config = SinkConfig {
            directory: String::new(),
            ..SinkConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = SinkConfig {
            directory: "/var/log/app".to_string(),
            max_size_bytes: 1024,
            max_retained_files: 3,
            sync_policy: SyncPolicy::EveryWrite,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: SinkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.directory, config.directory);
        assert_eq!(parsed.max_size_bytes, 1024);
        assert_eq!(parsed.sync_policy, SyncPolicy::EveryWrite);
    }
}
