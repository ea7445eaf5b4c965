//! Default config/log locations and the symlink-ancestor check used before writing logs.

use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// `$UPLOAD_RELOCATOR_CONFIG` if set, else `<config dir>/upload_relocator/config.xml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(p));
    }
    config_dir().map(|base| base.join("upload_relocator").join("config.xml"))
}

/// `<data dir>/upload_relocator/upload_relocator.log`.
pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|base| base.join("upload_relocator").join("upload_relocator.log"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() && fs::symlink_metadata(anc)?.file_type().is_symlink() {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}
