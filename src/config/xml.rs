//! XML configuration support (quick_xml + serde).
//!
//! ```xml
//! <config>
//!   <upload_dir>/srv/www/uploads</upload_dir>
//!   <upload_url>https://example.org/uploads</upload_url>
//!   <manifest>/srv/www/uploads/library.jsonl</manifest>
//!   <log_level>normal</log_level>
//!   <log_file>/var/log/upload_relocator.log</log_file>
//!   <max_name_attempts>10000</max_name_attempts>
//! </config>
//! ```
//!
//! Unknown elements are rejected so typos do not silently fall back to defaults.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use super::{CONFIG_ENV, MANIFEST_FILE_NAME};

#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    upload_dir: Option<String>,
    upload_url: Option<String>,
    manifest: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    max_name_attempts: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = match non_empty(parsed.upload_dir.as_deref()) {
        Some(dir) => Config::with_upload_dir(dir),
        None => Config::default(),
    };

    if let Some(url) = non_empty(parsed.upload_url.as_deref()) {
        cfg.upload_url = url.to_string();
    }
    if let Some(m) = non_empty(parsed.manifest.as_deref()) {
        cfg.manifest = PathBuf::from(m);
    } else {
        cfg.manifest = cfg.upload_dir.join(MANIFEST_FILE_NAME);
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);
    if let Some(n) = non_empty(parsed.max_name_attempts.as_deref()) {
        cfg.max_name_attempts = n
            .parse::<u32>()
            .with_context(|| format!("max_name_attempts must be a positive integer, got '{n}'"))?;
        if cfg.max_name_attempts == 0 {
            bail!("max_name_attempts must be at least 1");
        }
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid config xml '{}'", path.display()))
}

/// Load the effective config file.
///
/// An explicit `$UPLOAD_RELOCATOR_CONFIG` must exist. A missing default file yields
/// `Config::default()`.
pub fn load_config() -> Result<Config> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let Some(path) = default_config_path() else {
        debug!("no config directory available; using defaults");
        return Ok(Config::default());
    };
    if !path.exists() {
        if explicit {
            bail!("{CONFIG_ENV} points to a missing file: {}", path.display());
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path)
}
