use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn invmatch(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("invmatch").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home);
    cmd
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("train")).unwrap();
    fs::create_dir_all(dir.path().join("test")).unwrap();
    fs::write(dir.path().join("train/broken.pdf"), b"not really a pdf").unwrap();
    dir
}

#[test]
fn find_reports_unreadable_files_and_no_match() {
    let dir = workspace();

    invmatch(dir.path())
        .current_dir(dir.path())
        .args([
            "find",
            "test/invoice_102857.pdf",
            "--history",
            "train/broken.pdf",
            "train/missing.pdf",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No similar invoice found."))
        .stdout(predicate::str::contains("Input Invoice Features:"))
        .stdout(predicate::str::contains("invoice_number: Not found"))
        .stdout(predicate::str::contains("date: Not found"))
        .stdout(predicate::str::contains("amount: Not found"))
        .stderr(predicate::str::contains("Error reading train/broken.pdf"))
        .stderr(predicate::str::contains("Error reading train/missing.pdf"));
}

#[test]
fn find_expands_globs() {
    let dir = workspace();
    fs::write(dir.path().join("train/other.pdf"), b"%PDF-1.4 garbage").unwrap();

    invmatch(dir.path())
        .current_dir(dir.path())
        .args(["find", "test/q.pdf", "-H", "train/*.pdf", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"history_count\": 2"))
        .stdout(predicate::str::contains("\"matched\": null"));
}

#[test]
fn find_json_output_is_parseable() {
    let dir = workspace();

    let output = invmatch(dir.path())
        .current_dir(dir.path())
        .args(["find", "test/q.pdf", "-H", "train/broken.pdf", "-f", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["query"], "test/q.pdf");
    assert_eq!(report["score"], 0.0);
    assert!(report["features"]["invoice_number"].is_null());
}

#[test]
fn find_requires_history() {
    let dir = workspace();

    invmatch(dir.path())
        .args(["find", "test/q.pdf"])
        .assert()
        .failure();
}

#[test]
fn extract_missing_file_reports_not_found() {
    let dir = workspace();

    invmatch(dir.path())
        .current_dir(dir.path())
        .args(["extract", "test/missing.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invoice_number: Not found"))
        .stderr(predicate::str::contains("Error reading test/missing.pdf"));
}

#[test]
fn config_init_then_use() {
    let dir = workspace();
    let config_path = dir.path().join("invmatch.json");

    invmatch(dir.path())
        .args(["config", "init", "--output"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    assert!(config_path.exists());

    invmatch(dir.path())
        .args(["config", "init", "--output"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    invmatch(dir.path())
        .current_dir(dir.path())
        .arg("-c")
        .arg(&config_path)
        .args(["find", "test/q.pdf", "-H", "train/broken.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No similar invoice found."));
}

#[test]
fn invalid_rule_pattern_is_rejected() {
    let dir = workspace();
    let config_path = dir.path().join("bad.json");
    fs::write(
        &config_path,
        r#"{"extraction": {"rules": [{"label": "po", "pattern": "PO:\\s*(\\S+"}]}}"#,
    )
    .unwrap();

    invmatch(dir.path())
        .current_dir(dir.path())
        .arg("-c")
        .arg(&config_path)
        .args(["extract", "test/q.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pattern for po"));
}

#[test]
fn config_set_and_get_round_trip() {
    let dir = workspace();

    invmatch(dir.path())
        .args(["config", "set", "similarity.min_score", "0.2"])
        .assert()
        .success();

    invmatch(dir.path())
        .args(["config", "get", "similarity.min_score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.2"));

    invmatch(dir.path())
        .args(["config", "set", "similarity.nope", "1"])
        .assert()
        .failure();
}

#[test]
fn config_subcommands_follow_config_flag() {
    let dir = workspace();
    let config_path = dir.path().join("custom.json");

    invmatch(dir.path())
        .arg("-c")
        .arg(&config_path)
        .args(["config", "set", "similarity.min_score", "0.3"])
        .assert()
        .success();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(saved["similarity"]["min_score"], 0.3);

    invmatch(dir.path())
        .arg("-c")
        .arg(&config_path)
        .args(["config", "get", "similarity.min_score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3"));

    invmatch(dir.path())
        .arg("-c")
        .arg(&config_path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"));

    // the default location stays untouched
    invmatch(dir.path())
        .args(["config", "get", "similarity.min_score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0"));
}

#[test]
fn compare_unreadable_files_scores_zero() {
    let dir = workspace();

    invmatch(dir.path())
        .current_dir(dir.path())
        .args(["compare", "train/broken.pdf", "test/missing.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Similarity score: 0\n"));
}
