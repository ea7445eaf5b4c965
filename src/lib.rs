//! Core library for `upload_relocator`.
//!
//! Moves a batch of uploaded temp files into a destination directory, picking
//! `name-2.ext`, `name-3.ext`, ... when a name is taken, and optionally hands the
//! results to a content-library registrar. Host-platform concerns sit behind the
//! traits in [`host`]; filesystem access sits behind [`fs_ops::Filesystem`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod host;
pub mod output;
pub mod registry;
pub mod relocator;

pub use config::{Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::RelocateError;
pub use fs_ops::{DEFAULT_MAX_NAME_ATTEMPTS, Filesystem, LocalFs, generate_new_filename};
pub use host::{FileRegistrar, StaticUploadDir, UploadDirProvider};
pub use registry::{AttachmentRecord, ManifestRegistrar};
pub use relocator::{DestinationDir, FileOutcome, FileRelocator, PendingFile, RelocationReport};
