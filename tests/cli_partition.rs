use assert_fs::prelude::*;
use std::path::Path;
use std::process::{Command, Output};

/// Run the binary with an isolated (absent) config file.
fn dataprep(config_dir: &Path, args: &[&str]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("dataprep");
    Command::new(me)
        .env("DATAPREP_CONFIG", config_dir.join("config.xml"))
        .args(args)
        .output()
        .expect("spawn binary")
}

/// The `--json` summary is the only stdout line carrying a `command` key.
fn json_summary(out: &Output) -> serde_json::Value {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .find(|v| v.get("command").is_some())
        .expect("json summary line")
}

fn seeded_pick(seed: &str) -> Vec<String> {
    let temp = assert_fs::TempDir::new().unwrap();
    for i in 0..20 {
        temp.child(format!("src/img{i:02}.jpg")).touch().unwrap();
    }
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    let out = dataprep(
        temp.path(),
        &[
            "--json",
            "partition",
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            "--percentage",
            "25",
            "--mode",
            "copy",
            "--seed",
            seed,
        ],
    );
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    json_summary(&out)["report"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn json_summary_lists_each_transfer() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/a.jpg").touch().unwrap();
    temp.child("src/b.png").touch().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");

    let out = dataprep(
        temp.path(),
        &["--json", "partition", src.to_str().unwrap(), dst.to_str().unwrap(), "--ext", ".JPG"],
    );
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));

    let summary = json_summary(&out);
    assert_eq!(summary["command"], "partition");
    assert_eq!(summary["dry_run"], false);
    let items = summary["report"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "a.jpg");
    assert_eq!(items[0]["status"], "done");
    assert!(dst.join("a.jpg").exists());
    assert!(!src.join("a.jpg").exists());
    assert!(src.join("b.png").exists());
}

#[test]
fn same_seed_picks_the_same_files() {
    let first = seeded_pick("42");
    assert_eq!(first.len(), 5);
    assert_eq!(first, seeded_pick("42"));
}

#[test]
fn invalid_percentage_exits_with_its_code_and_creates_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/a.jpg").touch().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");

    let out = dataprep(
        temp.path(),
        &["partition", src.to_str().unwrap(), dst.to_str().unwrap(), "--percentage=150"],
    );
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("percentage must be between 0 and 100"));
    assert!(!dst.exists());
    assert!(src.join("a.jpg").exists());
}

#[test]
fn missing_source_exits_with_source_not_found() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.path().join("absent");
    let dst = temp.path().join("dst");
    let out = dataprep(temp.path(), &["partition", src.to_str().unwrap(), dst.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!dst.exists());
}

#[test]
fn dry_run_flag_leaves_files_in_place() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/a.jpg").touch().unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");

    let out = dataprep(
        temp.path(),
        &["--dry-run", "--json", "partition", src.to_str().unwrap(), dst.to_str().unwrap()],
    );
    assert!(out.status.success());
    let summary = json_summary(&out);
    assert_eq!(summary["dry_run"], true);
    assert_eq!(summary["report"]["items"][0]["status"], "planned");
    assert!(src.join("a.jpg").exists());
    assert!(!dst.exists());
}

#[test]
fn config_file_values_apply_unless_overridden() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("config.xml")
        .write_str("<config>\n  <on_conflict>skip</on_conflict>\n</config>\n")
        .unwrap();
    temp.child("src/a.jpg").write_str("new").unwrap();
    temp.child("dst/a.jpg").write_str("old").unwrap();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");

    let out = dataprep(
        temp.path(),
        &["--json", "partition", src.to_str().unwrap(), dst.to_str().unwrap(), "--mode", "copy"],
    );
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(json_summary(&out)["report"]["items"][0]["status"], "skipped");
    temp.child("dst/a.jpg").assert("old");

    let out = dataprep(
        temp.path(),
        &[
            "partition",
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            "--mode",
            "copy",
            "--on-conflict",
            "overwrite",
        ],
    );
    assert!(out.status.success());
    temp.child("dst/a.jpg").assert("new");
}
