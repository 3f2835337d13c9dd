use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn pillarcrop_cmd() -> Command {
    Command::cargo_bin("pillarcrop").expect("Failed to find pillarcrop binary")
}

#[test]
fn test_help_lists_subcommands() {
    pillarcrop_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("crop"))
        .stdout(contains("info"));
}

#[test]
fn test_version_flag() {
    pillarcrop_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_crop_requires_inputs() {
    pillarcrop_cmd()
        .arg("crop")
        .assert()
        .code(1)
        .stderr(contains("required"));
}

#[test]
fn test_crop_rejects_crf_out_of_range() {
    pillarcrop_cmd()
        .args(["crop", "input.mp4", "--crf", "64"])
        .assert()
        .code(1)
        .stderr(contains("--crf"));
}

#[test]
fn test_crop_rejects_zero_scan_seconds() {
    pillarcrop_cmd()
        .args(["crop", "input.mp4", "--use-cropdetect", "--scan-seconds", "0"])
        .assert()
        .code(1)
        .stderr(contains("--scan-seconds"));
}

#[test]
fn test_crop_rejects_file_as_output_dir() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let not_a_dir = dir.path().join("occupied");
    std::fs::write(&not_a_dir, "dummy content")?;

    pillarcrop_cmd()
        .args(["crop", "input.mp4", "-o"])
        .arg(&not_a_dir)
        .assert()
        .code(1)
        .stderr(contains("not a directory"));
    Ok(())
}

#[test]
fn test_unknown_subcommand_fails() {
    pillarcrop_cmd().arg("encode").assert().code(1);
}
