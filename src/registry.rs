//! Content-library registration backed by a JSON-lines manifest.
//!
//! Each registered file becomes one attachment record appended to the manifest. The
//! record carries the public URL, the title (base name minus its last extension), an
//! empty body and the "inherit" status. MIME type is left for the platform to fill in.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::fs_ops::io_error_with_help;
use crate::host::FileRegistrar;

/// Status given to every registered attachment.
pub const ATTACHMENT_STATUS: &str = "inherit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRecord {
    pub guid: String,
    pub post_mime_type: Option<String>,
    pub post_title: String,
    pub post_content: String,
    pub post_status: String,
    pub file: PathBuf,
}

impl AttachmentRecord {
    /// Build the record for a relocated file published under `base_url`.
    pub fn for_file(path: &Path, base_url: &str) -> Self {
        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            guid: format!("{}/{}", base_url.trim_end_matches('/'), base_name),
            post_mime_type: None,
            post_title: title_from_name(&base_name).to_string(),
            post_content: String::new(),
            post_status: ATTACHMENT_STATUS.to_string(),
            file: path.to_path_buf(),
        }
    }
}

/// Strip a final `.ext` where `ext` is non-empty and dot-free.
/// `photo.jpg` -> `photo`, `a.tar.gz` -> `a.tar`, `file.` -> `file.`, `.env` -> ``.
pub fn title_from_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}

#[derive(Debug, Clone)]
pub struct ManifestRegistrar {
    manifest: PathBuf,
    base_url: String,
}

impl ManifestRegistrar {
    pub fn new(manifest: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            manifest: manifest.into(),
            base_url: base_url.into(),
        }
    }

    pub fn manifest(&self) -> &Path {
        &self.manifest
    }
}

impl FileRegistrar for ManifestRegistrar {
    fn register_files(&self, paths: &[PathBuf]) -> Result<()> {
        let mut lines = String::new();
        for path in paths {
            let record = AttachmentRecord::for_file(path, &self.base_url);
            let line = serde_json::to_string(&record)
                .with_context(|| format!("serialize record for {}", path.display()))?;
            lines.push_str(&line);
            lines.push('\n');
        }

        if let Some(parent) = self.manifest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(io_error_with_help("create manifest directory", parent))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.manifest)
            .map_err(io_error_with_help("open manifest", &self.manifest))?;
        file.write_all(lines.as_bytes())
            .map_err(io_error_with_help("append to manifest", &self.manifest))?;

        debug!(manifest = %self.manifest.display(), records = paths.len(), "manifest updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_strips_only_last_extension() {
        assert_eq!(title_from_name("photo.jpg"), "photo");
        assert_eq!(title_from_name("archive.tar.gz"), "archive.tar");
        assert_eq!(title_from_name("README"), "README");
        assert_eq!(title_from_name("file."), "file.");
        assert_eq!(title_from_name(".env"), "");
    }

    #[test]
    fn record_fields() {
        let rec = AttachmentRecord::for_file(
            Path::new("/srv/uploads/2024/05/cat-2.png"),
            "https://example.org/uploads/2024/05/",
        );
        assert_eq!(rec.guid, "https://example.org/uploads/2024/05/cat-2.png");
        assert_eq!(rec.post_title, "cat-2");
        assert_eq!(rec.post_content, "");
        assert_eq!(rec.post_status, "inherit");
        assert_eq!(rec.post_mime_type, None);
    }
}
