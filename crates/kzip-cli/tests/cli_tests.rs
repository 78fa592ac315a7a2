//! Integration tests for kzip-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use kzip_core::test_utils::KzipBuilder;
use kzip_core::test_utils::RecordSpec;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn kzipinfo_cmd() -> Command {
    cargo_bin_cmd!("kzipinfo")
}

fn write_archive(temp: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, bytes).expect("failed to write archive");
    path
}

fn hello_archive() -> Vec<u8> {
    KzipBuilder::new()
        .add(RecordSpec::new("hello.txt", b"abc").timestamp(1_700_000_000))
        .build()
}

fn mismatched_archive() -> Vec<u8> {
    KzipBuilder::new()
        .add(RecordSpec::new("good.txt", b"fine"))
        .add(
            RecordSpec::new("bad.txt", b"data")
                .directory("docs")
                .raw_crc32([0xDE, 0xAD, 0xBE, 0xEF]),
        )
        .build()
}

#[test]
fn test_version_flag() {
    kzipinfo_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kzipinfo"));
}

#[test]
fn test_help_flag() {
    kzipinfo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inspect KZIP archives"));
}

#[test]
fn test_missing_archive_argument() {
    kzipinfo_cmd().assert().failure();
}

#[test]
fn test_hello_report() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "hello.kzip", &hello_archive());

    kzipinfo_cmd()
        .arg(&path)
        .arg("--utc")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive version: v1.0.x"))
        .stdout(predicate::str::contains("Compression Mode: Raw"))
        .stdout(predicate::str::contains("File Count: 1"))
        .stdout(predicate::str::contains("Offset: 16"))
        .stdout(predicate::str::contains("File Name: hello.txt"))
        .stdout(predicate::str::contains("Timestamp: 2023-11-14 22:13:20 UTC"))
        .stdout(predicate::str::contains(
            "CRC32: C2412435 (true, Calculated C2412435)",
        ))
        .stdout(predicate::str::contains(
            "MD5: 900150983CD24FB0D6963F7D28E17F72 (true",
        ))
        .stdout(predicate::str::contains("File Size: 3 B"))
        .stdout(predicate::str::contains("Subdirectory").not());
}

#[test]
fn test_quiet_suppresses_report() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "hello.kzip", &hello_archive());

    kzipinfo_cmd()
        .arg(&path)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_shows_raw_fields() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bytes = KzipBuilder::new()
        .add(RecordSpec::new("hello.txt", b"abc"))
        .trailing(b"junk")
        .build();
    let path = write_archive(&temp, "verbose.kzip", &bytes);

    kzipinfo_cmd()
        .arg(&path)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Length Field: 2"))
        .stdout(predicate::str::contains("Layout issues:"))
        .stdout(predicate::str::contains("4 unreferenced bytes"));
}

#[test]
fn test_mismatch_reported_but_succeeds() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "mismatch.kzip", &mismatched_archive());

    kzipinfo_cmd()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Subdirectory: docs"))
        .stdout(predicate::str::contains("CRC32: EFBEADDE (false"))
        .stdout(predicate::str::contains("1 of 2 files verified"))
        .stdout(predicate::str::contains(
            "WARNING: 1 of 2 files failed checksum verification",
        ));
}

#[test]
fn test_strict_fails_on_mismatch() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "mismatch.kzip", &mismatched_archive());

    kzipinfo_cmd()
        .arg(&path)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed checksum verification"));
}

#[test]
fn test_strict_passes_clean_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "hello.kzip", &hello_archive());

    kzipinfo_cmd().arg(&path).arg("--strict").assert().success();
}

#[test]
fn test_invalid_archive_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "fake.kzip", b"not an archive");

    kzipinfo_cmd()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid archive"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_truncated_archive_names_file() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let mut bytes = mismatched_archive();
    bytes.truncate(bytes.len() - 1);
    let path = write_archive(&temp, "cut.kzip", &bytes);

    kzipinfo_cmd()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("file 2"))
        .stderr(predicate::str::contains("payload"));
}

#[test]
fn test_unsupported_version_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let bytes = KzipBuilder::new().version(0x02).build();
    let path = write_archive(&temp, "v2.kzip", &bytes);

    kzipinfo_cmd()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("0x02"));
}

#[test]
fn test_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    kzipinfo_cmd()
        .arg(temp.path().join("missing.kzip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_max_size_limit() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "hello.kzip", &hello_archive());

    kzipinfo_cmd()
        .arg(&path)
        .arg("--max-size")
        .arg("100")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-size"));

    kzipinfo_cmd()
        .arg(&path)
        .arg("--max-size")
        .arg("1K")
        .assert()
        .success();
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "mismatch.kzip", &mismatched_archive());

    let output = kzipinfo_cmd()
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["operation"], "inspect");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["file_count"], 2);
    assert_eq!(value["data"]["all_verified"], false);
    assert_eq!(value["data"]["files"][1]["directory"], "docs");
    assert_eq!(value["data"]["files"][1]["crc32"]["matches"], false);
    assert_eq!(value["data"]["files"][1]["md5"]["matches"], true);
}

#[test]
fn test_json_error_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "fake.kzip", b"nope");

    let output = kzipinfo_cmd()
        .arg(&path)
        .arg("--json")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["status"], "error");
    assert!(value["error"].as_str().unwrap().contains("Invalid archive"));
}

#[test]
fn test_json_strict_mismatch_is_single_document() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "mismatch.kzip", &mismatched_archive());

    let output = kzipinfo_cmd()
        .arg(&path)
        .arg("--json")
        .arg("--strict")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["status"], "error");
    assert!(
        value["error"]
            .as_str()
            .unwrap()
            .contains("1 of 2 files failed checksum verification")
    );
    assert_eq!(value["data"]["files"][1]["crc32"]["matches"], false);
}

#[test]
fn test_json_strict_clean_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "hello.kzip", &hello_archive());

    let output = kzipinfo_cmd()
        .arg(&path)
        .arg("--json")
        .arg("--strict")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["status"], "success");
}

#[test]
fn test_json_quiet_suppresses_report() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "hello.kzip", &hello_archive());

    kzipinfo_cmd()
        .arg(&path)
        .arg("--json")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_json_quiet_strict_reports_only_error() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "mismatch.kzip", &mismatched_archive());

    let output = kzipinfo_cmd()
        .arg(&path)
        .arg("--json")
        .arg("--quiet")
        .arg("--strict")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["status"], "error");
    assert!(value.get("data").is_none());
}

#[test]
fn test_strict_human_error_printed_once() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_archive(&temp, "mismatch.kzip", &mismatched_archive());

    let output = kzipinfo_cmd()
        .arg(&path)
        .arg("--strict")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output).unwrap();
    assert_eq!(stderr.matches("ERROR:").count(), 1);
}
