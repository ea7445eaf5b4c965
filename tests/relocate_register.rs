use assert_fs::prelude::*;
use serde_json::Value;
use std::fs;

use upload_relocator::{FileRelocator, ManifestRegistrar, PendingFile, RelocateError, StaticUploadDir};

fn manifest_lines(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn registers_each_relocated_file_as_a_record() {
    let temp = assert_fs::TempDir::new().unwrap();
    let uploads = temp.child("uploads");
    uploads.child("cat.png").write_str("existing").unwrap();
    let s1 = temp.child("php1");
    let s2 = temp.child("php2");
    s1.write_str("cat").unwrap();
    s2.write_str("notes").unwrap();
    let manifest = temp.child("library.jsonl");

    let relocator = FileRelocator::new(
        vec![
            PendingFile::new("cat.png", s1.path()),
            PendingFile::new("notes.tar.gz", s2.path()),
        ],
        &StaticUploadDir::new(uploads.path()),
    )
    .unwrap();
    let registrar = ManifestRegistrar::new(manifest.path(), "https://example.org/uploads/");
    let report = relocator.relocate_and_register(&registrar).unwrap();
    assert!(report.is_complete());

    let records = manifest_lines(manifest.path());
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["guid"], "https://example.org/uploads/cat-2.png");
    assert_eq!(records[0]["post_title"], "cat-2");
    assert_eq!(records[0]["post_content"], "");
    assert_eq!(records[0]["post_status"], "inherit");
    assert!(records[0]["post_mime_type"].is_null());
    let expected_file = uploads.path().join("cat-2.png");
    assert_eq!(records[0]["file"], &*expected_file.to_string_lossy());

    assert_eq!(records[1]["post_title"], "notes.tar");
}

#[test]
fn nothing_relocated_still_registers_once_with_empty_batch() {
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest = temp.child("library.jsonl");
    let relocator = FileRelocator::new(
        vec![PendingFile::new("ghost.txt", temp.path().join("missing"))],
        &StaticUploadDir::new(temp.child("uploads").path()),
    )
    .unwrap();
    let registrar = ManifestRegistrar::new(manifest.path(), "https://example.org/uploads");
    let report = relocator.relocate_and_register(&registrar).unwrap();

    assert_eq!(report.failed_count(), 1);
    assert!(manifest_lines(manifest.path()).is_empty());
}

#[test]
fn manifest_write_failure_is_a_registration_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("php1");
    src.write_str("x").unwrap();
    // A directory where the manifest file should be.
    let manifest = temp.child("library.jsonl");
    manifest.create_dir_all().unwrap();

    let relocator = FileRelocator::new(
        vec![PendingFile::new("x.txt", src.path())],
        &StaticUploadDir::new(temp.child("uploads").path()),
    )
    .unwrap();
    let registrar = ManifestRegistrar::new(manifest.path(), "https://example.org/uploads");

    match relocator.relocate_and_register(&registrar) {
        Err(RelocateError::Registration { report, source }) => {
            assert_eq!(report.relocated(), vec![temp.child("uploads").path().join("x.txt")]);
            assert!(source.to_string().contains("open manifest"));
        }
        other => panic!("expected registration failure, got {other:?}"),
    }
    temp.child("uploads/x.txt").assert("x");
}
