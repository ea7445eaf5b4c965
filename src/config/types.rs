//! Core configuration types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{MANIFEST_FILE_NAME, UPLOAD_DIR_DEFAULT, UPLOAD_URL_DEFAULT};
use crate::fs_ops::DEFAULT_MAX_NAME_ATTEMPTS;

/// Console verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// One line per relocated file (default)
    #[default]
    Normal,
    /// Collision renames and registration details
    Info,
    /// Everything, including each numbered variant tried
    Debug,
}

impl LogLevel {
    /// Case-insensitive; accepts a few common aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime settings for the relocator binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default upload directory handed to the relocator
    pub upload_dir: PathBuf,
    /// Public URL the upload directory is served under
    pub upload_url: String,
    /// JSON-lines manifest used for registration
    pub manifest: PathBuf,
    pub log_level: LogLevel,
    pub log_file: Option<PathBuf>,
    /// Cap on numbered variants tried for a colliding name
    pub max_name_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        let upload_dir = PathBuf::from(UPLOAD_DIR_DEFAULT);
        Self {
            manifest: upload_dir.join(MANIFEST_FILE_NAME),
            upload_dir,
            upload_url: UPLOAD_URL_DEFAULT.to_string(),
            log_level: LogLevel::Normal,
            log_file: None,
            max_name_attempts: DEFAULT_MAX_NAME_ATTEMPTS,
        }
    }
}

impl Config {
    /// Config rooted at `upload_dir`; the manifest lives inside it.
    pub fn with_upload_dir(upload_dir: impl Into<PathBuf>) -> Self {
        let upload_dir = upload_dir.into();
        Self {
            manifest: upload_dir.join(MANIFEST_FILE_NAME),
            upload_dir,
            ..Default::default()
        }
    }
}
