//! Size-triggered rotation: the rename chain that demotes rotated copies.
//!
//! `log_<date>.log.n-1` moves to `log_<date>.log.n`, then `log_<date>.log`
//! moves to `log_<date>.log.0`, freeing the active name for a fresh file.

use std::path::Path;

use crate::error::{SinkError, SinkResult};
use crate::path::rotated_path;

/// Shift the rotation chain to free the active file name.
///
/// The caller must have closed the active handle. Slots are processed from
/// the oldest (`.max_retained-1`) down to the newest, so a renamed file can
/// never collide with one that has not moved yet. The copy in the last slot
/// is deleted before the chain shifts into it.
///
/// The first failing step aborts the whole chain. The completed steps are a
/// consistent prefix of the shift, and the active file has not moved unless
/// every other step succeeded, so the caller can retry on the next write.
pub fn rotate(active_path: &Path, max_retained: u32) -> SinkResult<()> {
    for n in (0..max_retained).rev() {
        let source = if n == 0 {
            active_path.to_path_buf()
        } else {
            rotated_path(active_path, n - 1)
        };
        let target = rotated_path(active_path, n);

        if target.exists() {
            remove_step(&target)?;
        }
        if source.exists() {
            rename_step(&source, &target)?;
        }
    }
    Ok(())
}

fn remove_step(target: &Path) -> SinkResult<()> {
    std::fs::remove_file(target).map_err(|source| SinkError::Rotation {
        path: target.to_path_buf(),
        source,
    })
}

fn rename_step(source: &Path, target: &Path) -> SinkResult<()> {
    std::fs::rename(source, target).map_err(|err| SinkError::Rotation {
        path: source.to_path_buf(),
        source: err,
    })
}
