//! `read_annot` against real files on disk.

use fsatlas::{read_annot, AnnotError};
use tempfile::TempDir;

use crate::common::{destrieux_builder, write_file, AnnotBuilder, DESTRIEUX_NAMES};

#[test]
fn test_read_annot_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "lh.aparc.a2009s.annot", &destrieux_builder(40).build());

    let decoded = read_annot(&path).unwrap();
    assert_eq!(decoded.names(), DESTRIEUX_NAMES);
    assert_eq!(decoded.vertex_count, 40);
}

#[test]
fn test_read_annot_twice_is_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "rh.aparc.annot", &destrieux_builder(3).v2(75).build());

    let first = read_annot(&path).unwrap();
    let second = read_annot(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_file_released_after_partial_decode() {
    let dir = TempDir::new().unwrap();
    let bytes = AnnotBuilder::new()
        .entry(0, b"a")
        .entry(1, b"b")
        .truncate_tail(2)
        .build();
    let path = write_file(dir.path(), "broken.annot", &bytes);

    let decoded = read_annot(&path).unwrap();
    assert!(!decoded.is_complete());

    // Nothing holds the file open.
    std::fs::remove_file(&path).unwrap();
    assert!(!path.exists());
}

#[test]
fn test_read_annot_on_directory() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(read_annot(dir.path()), Err(AnnotError::Io { .. })));
}
