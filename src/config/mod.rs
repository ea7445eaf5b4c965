//! Configuration: types, default locations and XML loading.

pub mod paths;
pub mod types;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "UPLOAD_RELOCATOR_CONFIG";

pub const UPLOAD_DIR_DEFAULT: &str = "/var/lib/upload_relocator/uploads";
pub const UPLOAD_URL_DEFAULT: &str = "http://localhost/uploads";
pub const MANIFEST_FILE_NAME: &str = "library.jsonl";
