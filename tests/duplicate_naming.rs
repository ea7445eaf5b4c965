use std::fs;
use tempfile::tempdir;

use upload_relocator::{LocalFs, RelocateError, generate_new_filename};

#[test]
fn single_collision_gets_suffix_two() {
    let td = tempdir().unwrap();
    let dir = td.path();
    fs::write(dir.join("report.txt"), b"x").unwrap();
    let dst = generate_new_filename(&LocalFs, dir, &dir.join("report.txt"), 100).unwrap();
    assert_eq!(dst, dir.join("report-2.txt"));
}

#[test]
fn multiple_collisions_increment_suffix() {
    let td = tempdir().unwrap();
    let dir = td.path();
    fs::write(dir.join("report.txt"), b"1").unwrap();
    fs::write(dir.join("report-2.txt"), b"2").unwrap();
    fs::write(dir.join("report-3.txt"), b"3").unwrap();
    let dst = generate_new_filename(&LocalFs, dir, &dir.join("report.txt"), 100).unwrap();
    assert_eq!(dst, dir.join("report-4.txt"));
}

#[test]
fn gap_in_numbering_is_reused() {
    let td = tempdir().unwrap();
    let dir = td.path();
    fs::write(dir.join("a.jpg"), b"1").unwrap();
    fs::write(dir.join("a-3.jpg"), b"3").unwrap();
    let dst = generate_new_filename(&LocalFs, dir, &dir.join("a.jpg"), 100).unwrap();
    assert_eq!(dst, dir.join("a-2.jpg"));
}

#[test]
fn multi_extension_suffix_goes_before_last_extension() {
    let td = tempdir().unwrap();
    let dir = td.path();
    fs::write(dir.join("archive.tar.gz"), b"a").unwrap();
    let dst = generate_new_filename(&LocalFs, dir, &dir.join("archive.tar.gz"), 100).unwrap();
    assert_eq!(dst, dir.join("archive.tar-2.gz"));
}

#[test]
fn dotfile_and_extensionless_names() {
    let td = tempdir().unwrap();
    let dir = td.path();
    fs::write(dir.join(".env"), b"a").unwrap();
    fs::write(dir.join("README"), b"a").unwrap();
    assert_eq!(
        generate_new_filename(&LocalFs, dir, &dir.join(".env"), 100).unwrap(),
        dir.join(".env-2")
    );
    assert_eq!(
        generate_new_filename(&LocalFs, dir, &dir.join("README"), 100).unwrap(),
        dir.join("README-2")
    );
}

#[test]
fn directory_occupying_a_variant_counts_as_taken() {
    let td = tempdir().unwrap();
    let dir = td.path();
    fs::write(dir.join("photo.png"), b"a").unwrap();
    fs::create_dir(dir.join("photo-2.png")).unwrap();
    let dst = generate_new_filename(&LocalFs, dir, &dir.join("photo.png"), 100).unwrap();
    assert_eq!(dst, dir.join("photo-3.png"));
}

#[test]
fn bounded_search_fails_when_exhausted() {
    let td = tempdir().unwrap();
    let dir = td.path();
    fs::write(dir.join("x.bin"), b"0").unwrap();
    for n in 2..=4 {
        fs::write(dir.join(format!("x-{n}.bin")), b"n").unwrap();
    }
    let err = generate_new_filename(&LocalFs, dir, &dir.join("x.bin"), 3).unwrap_err();
    match err {
        RelocateError::NameSpaceExhausted { name, attempts, .. } => {
            assert_eq!(name, "x.bin");
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    // One more attempt is enough.
    assert_eq!(
        generate_new_filename(&LocalFs, dir, &dir.join("x.bin"), 4).unwrap(),
        dir.join("x-5.bin")
    );
}
