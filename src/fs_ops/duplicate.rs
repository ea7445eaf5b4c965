//! Collision-free destination names.
//!
//! When `dir/name.ext` is taken the search tries `name-2.ext`, `name-3.ext`, ... and
//! returns the first one that does not exist. The stem and extension come from the
//! candidate's base name, never from the directory part.
//!
//! The result only reflects the directory as it is now. Another process can claim the
//! name between this check and the move that follows (check-then-act); nothing here
//! coordinates concurrent writers to the same directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::local::Filesystem;
use crate::errors::RelocateError;

/// Upper bound on numbered variants tried before giving up.
pub const DEFAULT_MAX_NAME_ATTEMPTS: u32 = 10_000;

/// First numeric suffix used on collision.
const FIRST_SUFFIX: u32 = 2;

/// Return the first free `{dir}{stem}-{n}.{ext}` for `n = 2, 3, ...`.
///
/// `candidate` is the already-taken `dir/name.ext`. Names without an extension get
/// `{stem}-{n}`. Fails with `NameSpaceExhausted` after `max_attempts` occupied variants.
pub fn generate_new_filename<F: Filesystem + ?Sized>(
    fs: &F,
    dir: &Path,
    candidate: &Path,
    max_attempts: u32,
) -> Result<PathBuf, RelocateError> {
    let base_name = candidate
        .file_name()
        .ok_or_else(|| RelocateError::InvalidFileName(candidate.display().to_string()))?;
    let base = Path::new(base_name);
    let stem = base.file_stem().unwrap_or(base_name);
    let ext = base.extension();

    for n in (FIRST_SUFFIX..).take(max_attempts as usize) {
        let mut name = OsString::from(stem);
        name.push(format!("-{n}"));
        if let Some(ext) = ext {
            name.push(".");
            name.push(ext);
        }
        let path = dir.join(&name);
        if !fs.exists(&path) {
            return Ok(path);
        }
        trace!(path = %path.display(), "numbered variant taken");
    }

    Err(RelocateError::NameSpaceExhausted {
        dir: dir.to_path_buf(),
        name: base_name.to_string_lossy().into_owned(),
        attempts: max_attempts,
    })
}
