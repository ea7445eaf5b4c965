//! Batch relocation of uploaded files.
//!
//! A `FileRelocator` owns a fixed batch of pending uploads and the default destination
//! resolved when it was built. `relocate` moves every upload in order and reports a
//! per-file outcome; one failed move never stops the rest of the batch.

use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::errors::RelocateError;
use crate::fs_ops::{DEFAULT_MAX_NAME_ATTEMPTS, Filesystem, LocalFs, generate_new_filename};
use crate::host::{FileRegistrar, UploadDirProvider};

/// One upload waiting to be moved. The temporary `source` belongs to whoever produced
/// it; the relocator consumes it once and never cleans it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub original_name: String,
    pub source: PathBuf,
}

impl PendingFile {
    pub fn new(original_name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            original_name: original_name.into(),
            source: source.into(),
        }
    }
}

/// A destination directory with trailing separators normalised away.
///
/// `Display` renders it with exactly one trailing separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationDir(PathBuf);

impl DestinationDir {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, RelocateError> {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(RelocateError::EmptyUploadDir);
        }
        Ok(Self(dir.components().collect()))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DestinationDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.display().to_string();
        if shown.ends_with(MAIN_SEPARATOR) {
            f.write_str(&shown)
        } else {
            write!(f, "{shown}{MAIN_SEPARATOR}")
        }
    }
}

/// What happened to a single pending file.
#[derive(Debug)]
pub struct FileOutcome {
    pub original_name: String,
    pub source: PathBuf,
    pub result: Result<PathBuf, RelocateError>,
}

impl FileOutcome {
    pub fn dest(&self) -> Option<&Path> {
        self.result.as_deref().ok()
    }

    pub fn error(&self) -> Option<&RelocateError> {
        self.result.as_ref().err()
    }
}

/// Outcomes of one `relocate` call, in batch order.
#[derive(Debug, Default)]
pub struct RelocationReport {
    outcomes: Vec<FileOutcome>,
}

impl RelocationReport {
    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Destination paths of the files that moved, in batch order.
    pub fn relocated(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| o.dest().map(Path::to_path_buf))
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// True when every file in the batch was relocated.
    pub fn is_complete(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

pub struct FileRelocator<F: Filesystem = LocalFs> {
    batch: Vec<PendingFile>,
    default_destination: DestinationDir,
    fs: F,
    max_name_attempts: u32,
}

impl FileRelocator<LocalFs> {
    /// Build a relocator for `batch`, resolving the default destination once via `provider`.
    pub fn new<P>(batch: Vec<PendingFile>, provider: &P) -> Result<Self, RelocateError>
    where
        P: UploadDirProvider + ?Sized,
    {
        Self::with_fs(batch, provider, LocalFs)
    }
}

impl<F: Filesystem> FileRelocator<F> {
    pub fn with_fs<P>(batch: Vec<PendingFile>, provider: &P, fs: F) -> Result<Self, RelocateError>
    where
        P: UploadDirProvider + ?Sized,
    {
        let resolved = provider
            .resolve_default_upload_directory()
            .map_err(|e| RelocateError::UploadDirUnavailable(format!("{e:#}")))?;
        let default_destination = DestinationDir::new(resolved)?;
        debug!(dir = %default_destination, files = batch.len(), "relocator ready");
        Ok(Self {
            batch,
            default_destination,
            fs,
            max_name_attempts: DEFAULT_MAX_NAME_ATTEMPTS,
        })
    }

    /// Cap on numbered variants tried per colliding name.
    pub fn with_max_name_attempts(mut self, attempts: u32) -> Self {
        self.max_name_attempts = attempts;
        self
    }

    pub fn default_destination(&self) -> &DestinationDir {
        &self.default_destination
    }

    /// Move every pending file into `destination`, or the default destination when `None`.
    pub fn relocate(&self, destination: Option<&Path>) -> RelocationReport {
        let dir = match destination {
            Some(p) => match DestinationDir::new(p) {
                Ok(d) => d,
                Err(_) => return self.fail_all(p, "destination path is empty"),
            },
            None => self.default_destination.clone(),
        };

        if let Err(e) = self.fs.create_dir_all(dir.as_path()) {
            warn!(dir = %dir, error = %e, "destination unavailable; no files moved");
            return self.fail_all(dir.as_path(), &e.to_string());
        }

        let outcomes = self
            .batch
            .iter()
            .map(|file| {
                let result = self.relocate_one(dir.as_path(), file);
                if let Err(e) = &result {
                    warn!(code = e.code(), name = %file.original_name, error = %e, "upload not relocated");
                }
                FileOutcome {
                    original_name: file.original_name.clone(),
                    source: file.source.clone(),
                    result,
                }
            })
            .collect();

        RelocationReport { outcomes }
    }

    /// Relocate to the default destination, then register exactly the relocated paths.
    pub fn relocate_and_register(
        &self,
        registrar: &dyn FileRegistrar,
    ) -> Result<RelocationReport, RelocateError> {
        let report = self.relocate(None);
        let relocated = report.relocated();
        match registrar.register_files(&relocated) {
            Ok(()) => {
                info!(count = relocated.len(), "registered relocated files");
                Ok(report)
            }
            Err(e) => {
                let msg = format!("{e:#}");
                error!(count = relocated.len(), error = %msg, "registration failed");
                Err(RelocateError::Registration {
                    report,
                    source: e.into(),
                })
            }
        }
    }

    fn relocate_one(&self, dir: &Path, file: &PendingFile) -> Result<PathBuf, RelocateError> {
        let name = Path::new(&file.original_name)
            .file_name()
            .ok_or_else(|| RelocateError::InvalidFileName(file.original_name.clone()))?;

        let mut dest = dir.join(name);
        if self.fs.exists(&dest) {
            let renamed = generate_new_filename(&self.fs, dir, &dest, self.max_name_attempts)?;
            debug!(wanted = %dest.display(), chosen = %renamed.display(), "name taken; using numbered variant");
            dest = renamed;
        }

        self.fs
            .move_file(&file.source, &dest)
            .map_err(|source| RelocateError::MoveFailed {
                src: file.source.clone(),
                dest: dest.clone(),
                source,
            })?;

        info!(src = %file.source.display(), dest = %dest.display(), "relocated upload");
        Ok(dest)
    }

    fn fail_all(&self, dir: &Path, reason: &str) -> RelocationReport {
        let outcomes = self
            .batch
            .iter()
            .map(|file| FileOutcome {
                original_name: file.original_name.clone(),
                source: file.source.clone(),
                result: Err(RelocateError::DestinationUnavailable {
                    dir: dir.to_path_buf(),
                    reason: reason.to_string(),
                }),
            })
            .collect();
        RelocationReport { outcomes }
    }
}
