//! Integration tests for the `unflatten` binary.

mod common;

use common::synthetic_image::dome_lit_u8;
use std::path::{Path, PathBuf};
use std::process::Command;
use unflattener::image::io::save_image;
use unflattener::Direction;

fn unflatten_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_unflatten"))
}

fn write_dome_inputs(dir: &Path) -> Vec<(Direction, PathBuf)> {
    Direction::ALL
        .into_iter()
        .map(|direction| {
            let path = dir.join(format!("{direction}.png"));
            save_image(
                &image::DynamicImage::ImageLuma8(dome_lit_u8(20, 16, 6.0, direction)),
                &path,
            )
            .unwrap();
            (direction, path)
        })
        .collect()
}

#[test]
fn no_inputs_prints_help_and_fails() {
    let output = Command::new(unflatten_bin())
        .output()
        .expect("failed to run unflatten");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: at least one of"), "{stderr}");
    assert!(stderr.contains("--top <TOP>"), "help missing from stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn writes_normal_map_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_dome_inputs(dir.path());
    let out = dir.path().join("out/normal.png");
    let report = dir.path().join("out/report.json");

    let mut cmd = Command::new(unflatten_bin());
    for (direction, path) in &inputs {
        cmd.arg(format!("--{direction}")).arg(path);
    }
    let output = cmd
        .arg("-o")
        .arg(&out)
        .arg("-d")
        .arg("0.25")
        .arg("--verify")
        .arg("--report")
        .arg(&report)
        .output()
        .expect("failed to run unflatten");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = image::open(&out).unwrap();
    assert_eq!((written.width(), written.height()), (20, 16));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["width"], 20);
    assert_eq!(json["height"], 16);
    assert_eq!(json["depth"], 0.25);
    assert_eq!(json["verification"]["equivalent"], true);
    assert_eq!(json["inputs"].as_array().unwrap().len(), 4);
}

#[test]
fn config_file_supplies_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_dome_inputs(dir.path());
    let out = dir.path().join("from-config.png");
    let config = dir.path().join("unflatten.json");
    let left = &inputs.iter().find(|(d, _)| *d == Direction::Left).unwrap().1;
    let right = &inputs.iter().find(|(d, _)| *d == Direction::Right).unwrap().1;
    let json = serde_json::json!({
        "inputs": { "left": left, "right": right },
        "output": out,
        "depth": 1.0,
    });
    std::fs::write(&config, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    let status = Command::new(unflatten_bin())
        .arg("--config")
        .arg(&config)
        .status()
        .expect("failed to run unflatten");
    assert!(status.success());
    assert!(out.exists());
}

#[test]
fn invalid_depth_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = write_dome_inputs(dir.path());
    let status = Command::new(unflatten_bin())
        .arg("--left")
        .arg(&inputs[2].1)
        .arg("--depth")
        .arg("1.5")
        .arg("-o")
        .arg(dir.path().join("never.png"))
        .status()
        .expect("failed to run unflatten");
    assert!(!status.success());
    assert!(!dir.path().join("never.png").exists());
}
