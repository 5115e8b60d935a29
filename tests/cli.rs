use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn easel_cmd() -> Command {
    let mut cmd = Command::cargo_bin("easel").expect("binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn easel_help_prints_about() {
    easel_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Retained-mode 2D drawing with world coordinates",
        ));
}

#[test]
fn no_flags_prints_usage() {
    easel_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--snapshot"));
}

#[test]
fn snapshot_writes_png_of_window_size() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("scene.png");

    easel_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--snapshot")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote sample scene"));

    assert_eq!(image::image_dimensions(&out).unwrap(), (320, 240));
}

#[test]
fn snapshot_respects_config_file() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("easel");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[window]\nbackground = \"black\"\n[render]\nantialias = false\n",
    )
    .unwrap();
    let out = temp.path().join("scene.png");

    easel_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--snapshot")
        .arg(&out)
        .assert()
        .success();

    let rendered = image::open(&out).unwrap().to_rgb8();
    // top-right corner is outside every sample shape
    assert_eq!(rendered.get_pixel(319, 0).0, [0, 0, 0]);
}

#[test]
fn convert_reencodes_by_extension() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.png");
    let output = temp.path().join("output.bmp");
    let mut source = image::RgbImage::new(3, 2);
    source.put_pixel(2, 1, image::Rgb([12, 34, 56]));
    source.save(&input).unwrap();

    easel_cmd()
        .arg("--convert")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted"));

    let converted = image::open(&output).unwrap().to_rgb8();
    assert_eq!(converted.dimensions(), (3, 2));
    assert_eq!(converted.get_pixel(2, 1).0, [12, 34, 56]);
}

#[test]
fn convert_requires_output() {
    easel_cmd()
        .args(["--convert", "input.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn convert_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("input.png");
    image::RgbImage::new(1, 1).save(&input).unwrap();

    easel_cmd()
        .arg("--convert")
        .arg(&input)
        .arg("--output")
        .arg(temp.path().join("output.nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot infer image format"));
}

#[test]
fn convert_reports_missing_input() {
    let temp = TempDir::new().unwrap();
    easel_cmd()
        .arg("--convert")
        .arg(temp.path().join("missing.png"))
        .arg("--output")
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
