use assert_fs::prelude::*;
use dataprep::{append_manifest, DataPrepError};
use std::fs;

fn columns() -> Vec<String> {
    vec!["filename".to_string(), "label".to_string()]
}

#[test]
fn two_appends_write_one_header_and_two_row_sets() {
    let temp = assert_fs::TempDir::new().unwrap();
    for name in ["x.jpg", "y.jpg", "z.png"] {
        temp.child("train").child(name).touch().unwrap();
    }
    let csv_path = temp.path().join("train.csv");

    append_manifest(&csv_path, temp.child("train").path(), Some(&columns()), Some("dog"), false).unwrap();
    // Columns on an existing manifest are ignored.
    let second = append_manifest(&csv_path, temp.child("train").path(), None, Some("dog"), false).unwrap();
    assert!(!second.header_written);
    assert_eq!(second.rows, 3);

    let text = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 3 + 3);
    assert_eq!(lines.iter().filter(|l| **l == "filename,label").count(), 1);
    assert_eq!(lines[0], "filename,label");
    assert!(lines[1..].iter().all(|l| l.ends_with(",dog")));
}

#[test]
fn rows_without_label_have_a_single_field() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("imgs/a.jpg").touch().unwrap();
    let csv_path = temp.path().join("m.csv");
    append_manifest(&csv_path, temp.child("imgs").path(), Some(&columns()), None, false).unwrap();
    assert_eq!(fs::read_to_string(&csv_path).unwrap(), "filename,label\na.jpg\n");
}

#[test]
fn creating_without_columns_fails_and_creates_no_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("imgs/a.jpg").touch().unwrap();
    let csv_path = temp.path().join("new.csv");
    let err = append_manifest(&csv_path, temp.child("imgs").path(), None, Some("cat"), false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DataPrepError>(),
        Some(DataPrepError::ColumnsRequired(_))
    ));
    assert!(!csv_path.exists());
}

#[test]
fn empty_source_appends_zero_rows() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("empty").create_dir_all().unwrap();
    temp.child("m.csv").write_str("filename,label\nold.jpg,cat\n").unwrap();
    let report = append_manifest(temp.child("m.csv").path(), temp.child("empty").path(), None, Some("cat"), false).unwrap();
    assert_eq!(report.rows, 0);
    temp.child("m.csv").assert("filename,label\nold.jpg,cat\n");
}

#[test]
fn subdirectories_are_not_listed() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("imgs/a.jpg").touch().unwrap();
    temp.child("imgs/nested/b.jpg").touch().unwrap();
    let csv_path = temp.path().join("m.csv");
    let report = append_manifest(&csv_path, temp.child("imgs").path(), Some(&columns()), Some("l"), false).unwrap();
    assert_eq!(report.rows, 1);
}
