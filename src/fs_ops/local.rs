//! Filesystem seam used by the relocator.
//! `LocalFs` talks to the real filesystem; tests substitute an in-memory fake.

use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

use super::atomic::try_atomic_move;
use super::copy::copy_then_remove;
use super::helpers::io_error_with_help_io;
use super::util::is_cross_device;

pub trait Filesystem {
    /// True if any entry (file, directory or link) occupies `path`.
    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Move a file from its temporary location to `dest`.
    fn move_file(&self, src: &Path, dest: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupied
        fs::symlink_metadata(path).is_ok()
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir).map_err(io_error_with_help_io("create destination directory", dir))
    }

    fn move_file(&self, src: &Path, dest: &Path) -> io::Result<()> {
        match try_atomic_move(src, dest) {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                warn!(src = %src.display(), dest = %dest.display(), "cross-filesystem upload; copying instead of renaming");
                copy_then_remove(src, dest)
            }
            Err(e) => Err(io_error_with_help_io("move upload", src)(e)),
        }
    }
}
