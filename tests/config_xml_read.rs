//! Verify XML config is parsed without touching user state.

use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use upload_relocator::config::load_config_from_xml_path;
use upload_relocator::{Config, LogLevel};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    let upload_dir = td.path().join("uploads");
    let log_file = td.path().join("relocator.log");

    let xml = format!(
        r#"
<config>
  <upload_dir>{}</upload_dir>
  <upload_url>https://example.org/wp-content/uploads</upload_url>
  <log_level>debug</log_level>
  <log_file>{}</log_file>
  <max_name_attempts> 50 </max_name_attempts>
</config>
"#,
        upload_dir.display(),
        log_file.display()
    );
    fs::write(&cfg_path, xml).unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");
    assert_eq!(cfg.upload_dir, upload_dir);
    assert_eq!(cfg.upload_url, "https://example.org/wp-content/uploads");
    assert_eq!(cfg.manifest, upload_dir.join("library.jsonl"));
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
    assert_eq!(cfg.max_name_attempts, 50);
}

#[test]
fn empty_elements_fall_back_to_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <upload_dir>  </upload_dir>\n  <log_file></log_file>\n</config>\n",
    )
    .unwrap();
    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn explicit_manifest_is_kept() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config><upload_dir>/srv/up</upload_dir><manifest>/srv/meta/lib.jsonl</manifest></config>",
    )
    .unwrap();
    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.upload_dir, PathBuf::from("/srv/up"));
    assert_eq!(cfg.manifest, PathBuf::from("/srv/meta/lib.jsonl"));
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><upload_dri>/srv/up</upload_dri></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn bad_values_are_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");

    fs::write(&cfg_path, "<config><max_name_attempts>0</max_name_attempts></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());

    fs::write(&cfg_path, "<config><max_name_attempts>lots</max_name_attempts></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());

    fs::write(&cfg_path, "<config><log_level>loud</log_level></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}
