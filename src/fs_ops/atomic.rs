//! Atomic rename helper.
//! - Never removes an existing destination; collision handling happens before this.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use super::util::fsync_dir;

/// Rename `src` to `dst`. The raw OS error is kept on the returned error so callers
/// can detect cross-device failures before enriching it.
pub fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    // A failed fsync must not turn a completed rename into a failure.
    if let Some(parent) = dst.parent()
        && let Err(e) = fsync_dir(parent)
    {
        debug!(dir = %parent.display(), error = %e, "directory fsync after rename failed");
    }

    Ok(())
}
