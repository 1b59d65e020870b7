use assert_fs::prelude::*;
use std::path::Path;
use std::process::{Command, Output};

fn dataprep(config_dir: &Path, args: &[&str]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("dataprep");
    Command::new(me)
        .env("DATAPREP_CONFIG", config_dir.join("config.xml"))
        .args(args)
        .output()
        .expect("spawn binary")
}

#[test]
fn resizes_images_and_ignores_other_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("raw").create_dir_all().unwrap();
    image::RgbImage::from_pixel(40, 30, image::Rgb([0, 120, 255]))
        .save(temp.path().join("raw/photo.png"))
        .unwrap();
    temp.child("raw/readme.txt").write_str("not an image").unwrap();
    let out_dir = temp.path().join("small");

    let out = dataprep(
        temp.path(),
        &[
            "resize",
            temp.child("raw").path().to_str().unwrap(),
            out_dir.to_str().unwrap(),
            "--width",
            "16",
            "--height",
            "8",
        ],
    );
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(image::image_dimensions(out_dir.join("photo.png")).unwrap(), (16, 8));
    assert!(!out_dir.join("readme.txt").exists());
}

#[test]
fn undecodable_image_is_reported_but_not_fatal() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("raw/broken.jpg").write_str("garbage").unwrap();
    let out_dir = temp.path().join("small");

    let out = dataprep(
        temp.path(),
        &[
            "resize",
            temp.child("raw").path().to_str().unwrap(),
            out_dir.to_str().unwrap(),
            "--width",
            "4",
            "--height",
            "4",
        ],
    );
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 failed"), "stderr={stderr}");
    assert!(stderr.contains("broken.jpg"), "stderr={stderr}");
}

#[test]
fn zero_width_exits_with_invalid_size() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("raw").create_dir_all().unwrap();
    let out_dir = temp.path().join("small");
    let out = dataprep(
        temp.path(),
        &[
            "resize",
            temp.child("raw").path().to_str().unwrap(),
            out_dir.to_str().unwrap(),
            "--width",
            "0",
            "--height",
            "4",
        ],
    );
    assert_eq!(out.status.code(), Some(5));
    assert!(!out_dir.exists());
}
