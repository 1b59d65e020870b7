use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use dataprep::{default_config_path, default_log_path, load_config, ConflictPolicy, LogLevel};

#[test]
#[serial]
fn env_config_is_loaded_and_log_colocates() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("custom_config.xml");
    fs::write(
        &cfg,
        "<config>\n  <log_level>info</log_level>\n  <on_conflict>rename</on_conflict>\n</config>",
    )
    .unwrap();

    unsafe {
        std::env::set_var("DATAPREP_CONFIG", &cfg);
    }

    let resolved_cfg = default_config_path().expect("default_config_path");
    assert_eq!(resolved_cfg, cfg);
    let resolved_log = default_log_path().expect("default_log_path");
    assert_eq!(resolved_log.parent(), cfg.parent());

    let loaded = load_config(None).unwrap().expect("config present");
    assert_eq!(loaded.log_level, LogLevel::Info);
    assert_eq!(loaded.on_conflict, ConflictPolicy::Rename);

    unsafe {
        std::env::remove_var("DATAPREP_CONFIG");
    }
}

#[test]
#[serial]
fn env_directory_gets_config_xml_appended() {
    let td = tempdir().unwrap();
    unsafe {
        std::env::set_var("DATAPREP_CONFIG", td.path());
    }
    let resolved = default_config_path().unwrap();
    assert_eq!(resolved, td.path().join("config.xml"));
    // Absent file means defaults.
    assert!(load_config(None).unwrap().is_none());
    unsafe {
        std::env::remove_var("DATAPREP_CONFIG");
    }
}

#[test]
#[serial]
fn env_relative_path_resolves_against_cwd() {
    unsafe {
        std::env::set_var("DATAPREP_CONFIG", "relative/dp.xml");
    }
    let resolved = default_config_path().unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("relative/dp.xml"));
    unsafe {
        std::env::remove_var("DATAPREP_CONFIG");
    }
}
