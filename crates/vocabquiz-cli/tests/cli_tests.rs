//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vocabquiz() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("vocabquiz").unwrap()
}

#[test]
fn validate_valid_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("list.txt");
    std::fs::write(
        &file,
        "\"hello\" (n) : \"xin chào\"\n\"run\" (v) : \"chạy\"\n",
    )
    .unwrap();

    vocabquiz()
        .arg("validate")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries parsed"))
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("chạy"));
}

#[test]
fn validate_reports_skipped_lines() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("list.txt");
    std::fs::write(&file, "\"hello\" (n) : \"xin chào\"\nnot a vocab line\n").unwrap();

    vocabquiz()
        .arg("validate")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries parsed"))
        .stdout(predicate::str::contains("1 line(s) did not match"));
}

#[test]
fn validate_file_with_no_entries_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("list.txt");
    std::fs::write(&file, "nothing useful here\n").unwrap();

    vocabquiz()
        .arg("validate")
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no valid vocabulary lines"));
}

#[test]
fn validate_nonexistent_file() {
    vocabquiz()
        .arg("validate")
        .arg("--file")
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    vocabquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created vocabquiz.toml"))
        .stdout(predicate::str::contains("Created vocab/starter.txt"));

    assert!(dir.path().join("vocabquiz.toml").exists());
    assert!(dir.path().join("vocab/starter.txt").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    vocabquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    vocabquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_starter_list_validates() {
    let dir = TempDir::new().unwrap();

    vocabquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    vocabquiz()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--file")
        .arg("vocab/starter.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 entries parsed"));
}

#[test]
fn quiz_with_unconfigured_provider_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("list.txt");
    std::fs::write(&file, "\"hello\" (n) : \"xin chào\"\n").unwrap();

    vocabquiz()
        .current_dir(dir.path())
        .env_remove("VOCABQUIZ_GEMINI_KEY")
        .env("HOME", dir.path())
        .arg("quiz")
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn help_output() {
    vocabquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "LLM-assisted English-Vietnamese vocabulary quiz",
        ));
}

#[test]
fn version_output() {
    vocabquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vocabquiz"));
}
