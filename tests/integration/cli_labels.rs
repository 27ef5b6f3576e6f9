//! The `labels` subcommand: output shape and exit codes.

use tempfile::TempDir;

use crate::common::{
    destrieux_builder, run_fsatlas, stderr_of, stdout_of, write_file, AnnotBuilder,
    DESTRIEUX_NAMES,
};

#[test]
fn test_labels_lists_names_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "lh.aparc.a2009s.annot", &destrieux_builder(8).build());

    let output = run_fsatlas(&["labels", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Labels in lh.aparc.a2009s.annot:"));
    assert!(stdout.contains(&format!("Total: {} labels", DESTRIEUX_NAMES.len())));

    let listed: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("  "))
        .collect();
    assert_eq!(listed, DESTRIEUX_NAMES);
    assert!(stderr_of(&output).is_empty());
}

#[test]
fn test_labels_missing_argument_exits_one() {
    let output = run_fsatlas(&["labels"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Usage"));
}

#[test]
fn test_no_subcommand_exits_one() {
    let output = run_fsatlas(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let output = run_fsatlas(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("labels"));
}

#[test]
fn test_labels_missing_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.annot");

    let output = run_fsatlas(&["labels", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.starts_with("error:"));
    assert!(stderr.contains("nope.annot"));
}

#[test]
fn test_labels_truncated_header_exits_one() {
    let dir = TempDir::new().unwrap();
    let bytes = AnnotBuilder::new().vertices(100).build();
    let path = write_file(dir.path(), "short.annot", &bytes[..50]);

    let output = run_fsatlas(&["labels", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("truncated annotation"));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn test_labels_partial_result_exits_zero() {
    let dir = TempDir::new().unwrap();
    let bytes = AnnotBuilder::new()
        .entry(0, b"Unknown")
        .entry(1, b"bankssts")
        .entry(2, b"caudalanteriorcingulate")
        .truncate_tail(6)
        .build();
    let path = write_file(dir.path(), "lh.aparc.annot", &bytes);

    let output = run_fsatlas(&["labels", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Total: 2 labels"));
    assert!(stdout.contains("  bankssts"));
    assert!(!stdout.contains("caudalanteriorcingulate"));

    let stderr = stderr_of(&output);
    let warnings: Vec<&str> = stderr.lines().filter(|l| l.starts_with("warning:")).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("entry 2 at byte"));
}

#[test]
fn test_labels_no_color_table() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "lh.empty.annot",
        &AnnotBuilder::new().vertices(2).without_color_table().build(),
    );

    let output = run_fsatlas(&["labels", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Total: 0 labels"));

    // Nothing after the total line may look like a label name.
    assert!(stdout.lines().all(|line| !line.starts_with("  ")));
    assert!(stderr_of(&output).is_empty());
}

#[test]
fn test_labels_empty_table_and_missing_table_differ_only_in_logs() {
    let empty_table = AnnotBuilder::new().vertices(2).build();
    let no_table = AnnotBuilder::new().vertices(2).without_color_table().build();

    let run = |bytes: &[u8]| {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "lh.aparc.annot", bytes);
        run_fsatlas(&["-vv", "labels", path.to_str().unwrap()])
    };
    let empty_output = run(&empty_table);
    let missing_output = run(&no_table);

    assert_eq!(empty_output.status.code(), Some(0));
    assert_eq!(missing_output.status.code(), Some(0));
    assert_eq!(stdout_of(&empty_output), stdout_of(&missing_output));

    let empty_log = stderr_of(&empty_output);
    let missing_log = stderr_of(&missing_output);
    assert!(empty_log.contains("color table declares zero entries"));
    assert!(!empty_log.contains("annotation has no color table"));
    assert!(missing_log.contains("annotation has no color table"));
    assert!(!missing_log.contains("color table declares zero entries"));
}

#[test]
fn test_labels_json() {
    let dir = TempDir::new().unwrap();
    let bytes = AnnotBuilder::new()
        .entry(0, b"a\0")
        .entry(1, b"b")
        .truncate_tail(1)
        .build();
    let path = write_file(dir.path(), "rh.test.annot", &bytes);

    let output = run_fsatlas(&["labels", "--json", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["file"], "rh.test.annot");
    assert_eq!(report["has_color_table"], true);
    assert_eq!(report["names"], serde_json::json!(["a"]));

    let diagnostics = report["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["index"], 1);
    assert_eq!(diagnostics[0]["skipped_entries"], 1);
    assert!(diagnostics[0]["reason"]
        .as_str()
        .unwrap()
        .contains("RGBA color truncated"));
}
