//! Command-line integration tests.
//!
//! These run the built `torfind` binary against temporary trees and check
//! the report on stdout and the exit status.

use std::process::{Command, Output};

use tempfile::TempDir;
use torfind_core::testing::fixtures;

fn torfind(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_torfind"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TORFIND_CONFIG")
        .output()
        .expect("Failed to run torfind")
}

fn tree() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    fixtures::write_torrent(temp.path(), "a.torrent", "Foo");
    fixtures::write_torrent(temp.path(), "b.torrent", "Bar");
    temp
}

#[test]
fn test_json_report() {
    let temp = tree();
    let root = temp.path().to_str().unwrap();

    let output = torfind(&["-p", root, "-n", "foo", "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["matches"],
        serde_json::json!([{ "relative_path": "./a.torrent", "decoded_name": "Foo" }])
    );
    assert_eq!(json["scanned"], 2);
}

#[test]
fn test_text_report_lists_all_without_name() {
    let temp = tree();
    let output = torfind(&["-p", temp.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Found 2 matching torrents"));
    assert!(stdout.contains("    ./a.torrent\n"));
    assert!(stdout.contains("    ./b.torrent\n"));
}

#[test]
fn test_text_report_names_undecodable_files() {
    let temp = tree();
    std::fs::write(temp.path().join("broken.torrent"), b"d4:info").unwrap();

    let output = torfind(&["-p", temp.path().to_str().unwrap(), "-n", "foo"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Could not decode torrent file: ./broken.torrent"));
    assert!(stdout.contains("    ./a.torrent\n"));
}

#[test]
fn test_copy_to_destination() {
    let temp = tree();
    let out = TempDir::new().unwrap();
    let output = torfind(&[
        "-p",
        temp.path().to_str().unwrap(),
        "-n",
        "bar",
        "-d",
        out.path().to_str().unwrap(),
        "--rename",
    ]);

    assert!(output.status.success());
    assert!(out.path().join("Bar.torrent").is_file());
    assert!(!out.path().join("Foo.torrent").exists());
}

#[test]
fn test_invalid_regex_exits_with_error() {
    let temp = tree();
    let output = torfind(&["-p", temp.path().to_str().unwrap(), "-r", "-n", "(unclosed"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("(unclosed"));
}

#[test]
fn test_missing_root_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    let output = torfind(&["-p", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Search root not found"));
}

#[test]
fn test_invalid_destination_exits_with_error() {
    let temp = tree();
    let blocker = fixtures::write_file(temp.path(), "blocker", b"file");
    let output = torfind(&[
        "-p",
        temp.path().to_str().unwrap(),
        "-d",
        blocker.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Found 2 matching torrents"));
    assert!(stdout.contains("Materialize aborted"));
}

#[test]
fn test_config_file() {
    let temp = tree();
    let config = fixtures::write_file(
        temp.path(),
        "torfind.toml",
        format!(
            "[search]\npath = {:?}\npattern = \"foo\"\n",
            temp.path().to_str().unwrap()
        )
        .as_bytes(),
    );

    let output = torfind(&["-c", config.to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["matches"][0]["decoded_name"], "Foo");
}
