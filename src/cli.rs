//! CLI definition and parsing.
//!
//! Notes:
//! - Uploads are positional `NAME=SOURCE`; a bare `SOURCE` keeps its own file name.
//!   The first `=` splits, so names cannot contain `=` but sources can.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::MANIFEST_FILE_NAME;
use crate::config::types::{Config, LogLevel};
use crate::relocator::PendingFile;

/// Move uploaded temp files into an upload directory without clobbering existing names.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Relocate uploaded files with collision-free names")]
pub struct Args {
    /// Uploads to relocate, in order.
    #[arg(value_name = "NAME=SOURCE", value_parser = parse_upload)]
    pub uploads: Vec<PendingFile>,

    /// Move into this directory instead of the configured upload directory.
    #[arg(long, value_hint = ValueHint::DirPath, conflicts_with = "register")]
    pub dest: Option<PathBuf>,

    /// Override the default upload directory.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub upload_dir: Option<PathBuf>,

    /// Override the public URL of the upload directory.
    #[arg(long, value_hint = ValueHint::Url)]
    pub upload_url: Option<String>,

    /// Override the registration manifest path.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Register relocated files in the content-library manifest.
    #[arg(long)]
    pub register: bool,

    /// Give up on a colliding name after this many numbered variants.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_name_attempts: Option<u32>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.upload_dir {
            // A manifest that only followed the old upload dir follows the new one.
            if cfg.manifest == cfg.upload_dir.join(MANIFEST_FILE_NAME) {
                cfg.manifest = dir.join(MANIFEST_FILE_NAME);
            }
            cfg.upload_dir = dir.clone();
        }
        if let Some(url) = &self.upload_url {
            cfg.upload_url = url.clone();
        }
        if let Some(m) = &self.manifest {
            cfg.manifest = m.clone();
        }
        if let Some(n) = self.max_name_attempts {
            cfg.max_name_attempts = n;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

/// Parse `NAME=SOURCE` or a bare `SOURCE`.
pub fn parse_upload(s: &str) -> Result<PendingFile, String> {
    match s.split_once('=') {
        Some((name, source)) => {
            let (name, source) = (name.trim(), source.trim());
            if name.is_empty() {
                return Err(format!("missing name in '{s}'"));
            }
            if source.is_empty() {
                return Err(format!("missing source path in '{s}'"));
            }
            Ok(PendingFile::new(name, source))
        }
        None => {
            let name = Path::new(s)
                .file_name()
                .ok_or_else(|| format!("cannot take a file name from '{s}'; use NAME=SOURCE"))?;
            Ok(PendingFile::new(name.to_string_lossy(), s))
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
