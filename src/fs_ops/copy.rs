//! Copy-and-rename fallback for moves that cross filesystems:
//! - Copies to a hidden temp file in the destination directory and syncs it
//! - Atomically renames temp -> dest
//! - Removes the source only once the destination is in place

use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::warn;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help_io;
use super::util::unique_temp_path;

pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> io::Result<()> {
    let dest_dir = dest.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination has no parent: {}", dest.display()),
        )
    })?;

    let tmp_path = unique_temp_path(dest_dir);

    if let Err(e) = copy_synced(src, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help_io("rename temporary file into place", dest)(e));
    }

    Ok(())
}

/// Copy then move: the source is removed only after `dest` exists.
///
/// Once the copy is in place the move counts as done; a source that cannot be removed
/// is logged and left behind.
pub fn copy_then_remove(src: &Path, dest: &Path) -> io::Result<()> {
    safe_copy_and_rename(src, dest)?;
    if let Err(e) = fs::remove_file(src) {
        let e = io_error_with_help_io("remove original upload", src)(e);
        warn!(src = %src.display(), dest = %dest.display(), error = %e, "upload copied but source left behind");
    }
    Ok(())
}

fn copy_synced(src: &Path, tmp: &Path) -> io::Result<()> {
    fs::copy(src, tmp).map_err(io_error_with_help_io("copy to temporary file", tmp))?;
    File::open(tmp)
        .and_then(|f| f.sync_all())
        .map_err(io_error_with_help_io("sync temporary file", tmp))
}
