//! Typed error definitions for upload_relocator.
//! Per-file failures are collected into a `RelocationReport`; a registration failure
//! is returned as an error that still carries the report.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::relocator::RelocationReport;

#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("Upload has no usable file name: '{0}'")]
    InvalidFileName(String),

    #[error("Destination directory {dir} is unavailable: {reason}")]
    DestinationUnavailable { dir: PathBuf, reason: String },

    #[error("Could not find a free file name for '{name}' in {dir} after {attempts} attempts")]
    NameSpaceExhausted {
        dir: PathBuf,
        name: String,
        attempts: u32,
    },

    #[error("Failed to move '{src}' -> '{dest}': {source}")]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Upload directory provider returned an empty path")]
    EmptyUploadDir,

    #[error("Upload directory could not be resolved: {0}")]
    UploadDirUnavailable(String),

    #[error("Registration of {} relocated file(s) failed: {source}", .report.relocated().len())]
    Registration {
        report: RelocationReport,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RelocateError {
    /// Stable short code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            RelocateError::InvalidFileName(_) => "invalid_file_name",
            RelocateError::DestinationUnavailable { .. } => "destination_unavailable",
            RelocateError::NameSpaceExhausted { .. } => "name_space_exhausted",
            RelocateError::MoveFailed { .. } => "move_failed",
            RelocateError::EmptyUploadDir => "empty_upload_dir",
            RelocateError::UploadDirUnavailable(_) => "upload_dir_unavailable",
            RelocateError::Registration { .. } => "registration_failed",
        }
    }
}
