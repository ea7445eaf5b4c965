//! Collaborators owned by the hosting platform.
//!
//! The relocator only needs two things from its host: where uploads go by default,
//! and a way to register already-moved files with the content library.

use anyhow::Result;
use std::path::PathBuf;

/// Resolves the platform's current default upload directory.
pub trait UploadDirProvider {
    fn resolve_default_upload_directory(&self) -> Result<PathBuf>;
}

/// Registers relocated files with the platform's content library.
///
/// Implementations decide MIME type, record layout and storage; the relocator
/// only hands over the paths, in relocation order.
pub trait FileRegistrar {
    fn register_files(&self, paths: &[PathBuf]) -> Result<()>;
}

/// Provider backed by a fixed, configured directory.
#[derive(Debug, Clone)]
pub struct StaticUploadDir(PathBuf);

impl StaticUploadDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self(dir.into())
    }
}

impl UploadDirProvider for StaticUploadDir {
    fn resolve_default_upload_directory(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

impl<F> UploadDirProvider for F
where
    F: Fn() -> Result<PathBuf>,
{
    fn resolve_default_upload_directory(&self) -> Result<PathBuf> {
        self()
    }
}
