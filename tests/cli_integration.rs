//! Integration tests for the `bathsched` CLI.
//!
//! Each test creates a temp project directory, runs `bathsched` as a subprocess,
//! and verifies stdout and/or file contents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `bathsched` binary.
fn bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("bathsched");
    path
}

/// Run `bathsched` with the given args in the given directory, returning (stdout, stderr, success).
fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(bin())
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run bathsched");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `bathsched` expecting success, return stdout.
fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run(dir, args);
    if !success {
        panic!(
            "bathsched {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// A fresh project named "Annex" in a temp directory
fn init_project() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    run_ok(tmp.path(), &["init", "--name", "Annex"]);
    tmp
}

// ---------------------------------------------------------------------------
// Project setup
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_settings() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_ok(tmp.path(), &["init", "--name", "Annex"]);
    assert!(out.starts_with("initialized schedule for \"Annex\""));
    let settings = fs::read_to_string(tmp.path().join("schedule/bathsched.toml")).unwrap();
    assert!(settings.contains("Annex"));

    let (_, stderr, success) = run(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_commands_outside_project_fail() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run(tmp.path(), &["show", "2026-03"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_project_dir_flag() {
    let tmp = init_project();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().to_str().unwrap();
    let out = run_ok(elsewhere.path(), &["-C", dir, "show", "2026-03"]);
    assert!(out.starts_with("Annex  2026-03"));
}

// ---------------------------------------------------------------------------
// Calendar edits
// ---------------------------------------------------------------------------

#[test]
fn test_show_month_text() {
    let tmp = init_project();
    let out = run_ok(tmp.path(), &["show", "2026-03"]);
    assert!(out.starts_with("Annex  2026-03  (updated "));
    assert!(out.contains("  week 1: Hygiene check (  ) [yellow]"));
    assert!(out.contains("  week 5: "));
    assert!(!out.contains("week 6"));
}

#[test]
fn test_day_edit_and_show() {
    let tmp = init_project();
    let out = run_ok(
        tmp.path(),
        &["day", "2026-03-02", "upper", "Smith\\nLee", "--color", "blue"],
    );
    assert_eq!(out, "2026-03-02 upper: Smith / Lee [blue]\n");

    let out = run_ok(tmp.path(), &["day", "2026-03-02"]);
    assert!(out.starts_with("2026-03-02 (Mon)\n"));
    assert!(out.contains("upper  Smith / Lee [blue]"));
    assert!(out.contains("middle (empty) [blue]"));

    // The override is stored as a partial day keyed by date
    let overrides = fs::read_to_string(tmp.path().join("schedule/overrides.json")).unwrap();
    assert!(overrides.contains("2026-03-02"));
    assert!(overrides.contains("Smith<br>Lee"));
}

#[test]
fn test_day_rejects_bad_input() {
    let tmp = init_project();
    let (_, stderr, success) = run(tmp.path(), &["day", "2026-03-02", "upper", "x", "--color", "teal"]);
    assert!(!success);
    assert!(stderr.contains("pink, blue, yellow, white, gray"));

    let (_, _, success) = run(tmp.path(), &["day", "2026-02-30"]);
    assert!(!success);
}

#[test]
fn test_undo_redo_across_runs() {
    let tmp = init_project();
    run_ok(tmp.path(), &["day", "2026-03-02", "upper", "Smith"]);

    let out = run_ok(tmp.path(), &["undo"]);
    assert_eq!(out, "undone (1/2)\n");
    let out = run_ok(tmp.path(), &["day", "2026-03-02", "upper"]);
    assert_eq!(out, "2026-03-02 upper: (empty) [pink]\n");

    let out = run_ok(tmp.path(), &["undo"]);
    assert_eq!(out, "nothing to undo\n");

    let out = run_ok(tmp.path(), &["redo"]);
    assert_eq!(out, "redone (2/2)\n");
    let out = run_ok(tmp.path(), &["day", "2026-03-02", "upper"]);
    assert_eq!(out, "2026-03-02 upper: Smith [pink]\n");
}

#[test]
fn test_week_footer_propagates_to_later_months() {
    let tmp = init_project();
    let out = run_ok(tmp.path(), &["week", "2026-03", "3", "Nails", "--propagate"]);
    assert_eq!(out, "week 3 (from 2026-03-15): Nails [yellow] (week)\n");

    // April's third row picks up the recurring default
    let out = run_ok(tmp.path(), &["week", "2026-04", "3"]);
    assert_eq!(out, "week 3 (from 2026-04-12): Nails [yellow] (row)\n");

    // A one-off footer stays in its own week
    run_ok(tmp.path(), &["week", "2026-04", "2", "Ears"]);
    let out = run_ok(tmp.path(), &["week", "2026-05", "2"]);
    assert!(out.contains("Hygiene check (  ) [yellow] (built-in)"));
}

#[test]
fn test_week_row_out_of_range() {
    let tmp = init_project();
    let (_, stderr, success) = run(tmp.path(), &["week", "2026-02", "5", "x"]);
    assert!(!success);
    assert!(stderr.contains("2026-02 has weeks 1-4"));
}

#[test]
fn test_show_json() {
    let tmp = init_project();
    run_ok(tmp.path(), &["day", "2026-03-04", "middle", "Lee"]);
    let out = run_ok(tmp.path(), &["show", "2026-03", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["facility"], "Annex");
    assert_eq!(parsed["weeks"].as_array().unwrap().len(), 5);
    let wednesday = &parsed["weeks"][0]["days"][3];
    assert_eq!(wednesday["date"], "2026-03-04");
    assert_eq!(wednesday["slot2"]["text"], "Lee");
    assert_eq!(parsed["weeks"][0]["footer"]["source"], "built-in");
}

// ---------------------------------------------------------------------------
// Master schedule and residents
// ---------------------------------------------------------------------------

#[test]
fn test_master_set_shows_on_every_matching_weekday() {
    let tmp = init_project();
    let out = run_ok(
        tmp.path(),
        &["master", "set", "mon", "upper", "A\\nB", "--color", "gray"],
    );
    assert_eq!(out, "Mon upper: A / B [gray]\n");

    let out = run_ok(tmp.path(), &["day", "2026-03-09", "upper"]);
    assert_eq!(out, "2026-03-09 upper: A / B [gray]\n");
    let out = run_ok(tmp.path(), &["day", "2026-04-13", "upper"]);
    assert_eq!(out, "2026-04-13 upper: A / B [gray]\n");

    // Master changes are undoable like any other
    run_ok(tmp.path(), &["undo"]);
    let out = run_ok(tmp.path(), &["day", "2026-03-09", "upper"]);
    assert_eq!(out, "2026-03-09 upper: (empty) [pink]\n");
}

#[test]
fn test_master_footers() {
    let tmp = init_project();
    run_ok(tmp.path(), &["master", "default-footer", "Towels"]);
    run_ok(tmp.path(), &["master", "footer", "1", "Nails", "--color", "white"]);

    let out = run_ok(tmp.path(), &["master"]);
    assert!(out.contains("Week footers\n  week 1: Nails [white]\n"));
    assert!(out.contains("Default footer: Towels"));

    let out = run_ok(tmp.path(), &["week", "2026-03", "2"]);
    assert!(out.contains("Towels"));
    assert!(out.ends_with("(global)\n"));
}

#[test]
fn test_master_footer_row_range() {
    let tmp = init_project();
    for row in ["0", "7", "200"] {
        let (_, stderr, success) = run(tmp.path(), &["master", "footer", row, "x"]);
        assert!(!success);
        assert!(stderr.contains("week row must be 1-6"), "{row}: {stderr}");
    }
    assert!(!tmp.path().join("schedule/master.json").exists());

    // the sixth row exists in months like August 2026
    run_ok(tmp.path(), &["master", "footer", "6", "Ears"]);
    let out = run_ok(tmp.path(), &["week", "2026-08", "6"]);
    assert!(out.contains("Ears"));
    assert!(out.ends_with("(row)\n"));
}

#[test]
fn test_residents_and_check() {
    let tmp = init_project();
    let out = run_ok(tmp.path(), &["residents", "add", "Smith", "Lee"]);
    assert!(out.ends_with("2 residents\n"));
    let out = run_ok(tmp.path(), &["residents"]);
    assert_eq!(out, "Smith\nLee\n");

    // Smith and Lee bathe on Monday and Thursday every week
    run_ok(tmp.path(), &["master", "append", "mon", "upper", "Smith"]);
    run_ok(tmp.path(), &["master", "append", "mon", "middle", "Lee"]);
    run_ok(tmp.path(), &["master", "append", "thu", "upper", "Smith"]);
    run_ok(tmp.path(), &["master", "append", "thu", "middle", "Lee"]);

    // Except one Thursday where Smith is replaced
    run_ok(tmp.path(), &["day", "2026-03-12", "upper", "Jones"]);

    // The clipped last week (29th to 31st) only holds one Monday
    let out = run_ok(tmp.path(), &["check", "2026-03"]);
    assert_eq!(
        out,
        "Week 2 (3/8-3/14)\n  Smith: 1\nWeek 5 (3/29-3/31)\n  Smith: 1\n  Lee: 1\n"
    );
}

#[test]
fn test_residents_remove() {
    let tmp = init_project();
    run_ok(tmp.path(), &["residents", "add", "Smith", "Lee"]);
    let out = run_ok(tmp.path(), &["residents", "rm", "Smith", "Nobody"]);
    assert!(out.contains("not listed: Nobody"));
    assert!(out.ends_with("1 residents\n"));
    let out = run_ok(tmp.path(), &["residents", "list"]);
    assert_eq!(out, "Lee\n");
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

#[test]
fn test_export_import_between_projects() {
    let source = init_project();
    run_ok(source.path(), &["day", "2026-03-02", "upper", "Smith"]);
    run_ok(source.path(), &["residents", "add", "Smith"]);
    let out = run_ok(source.path(), &["export", "-o", "backup.json"]);
    assert_eq!(out, "exported to backup.json\n");

    let backup = source.path().join("backup.json");
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&backup).unwrap()).unwrap();
    assert_eq!(parsed["version"], 2);

    let target = tempfile::TempDir::new().unwrap();
    run_ok(target.path(), &["init", "--name", "Elsewhere"]);
    let out = run_ok(target.path(), &["import", backup.to_str().unwrap()]);
    assert!(out.starts_with("imported "));
    assert!(out.contains("overrides"));

    let out = run_ok(target.path(), &["day", "2026-03-02", "upper"]);
    assert_eq!(out, "2026-03-02 upper: Smith [pink]\n");
    let out = run_ok(target.path(), &["residents"]);
    assert_eq!(out, "Smith\n");

    // The import is one undo step
    run_ok(target.path(), &["undo"]);
    let out = run_ok(target.path(), &["day", "2026-03-02", "upper"]);
    assert_eq!(out, "2026-03-02 upper: (empty) [pink]\n");
}

#[test]
fn test_import_rejects_newer_version() {
    let tmp = init_project();
    run_ok(tmp.path(), &["day", "2026-03-02", "upper", "Smith"]);
    let backup = tmp.path().join("future.json");
    fs::write(&backup, r#"{"version": 3, "overrides": {}}"#).unwrap();

    let (_, stderr, success) = run(tmp.path(), &["import", backup.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));

    // Nothing was touched
    let out = run_ok(tmp.path(), &["day", "2026-03-02", "upper"]);
    assert_eq!(out, "2026-03-02 upper: Smith [pink]\n");
}

// ---------------------------------------------------------------------------
// Labels and settings
// ---------------------------------------------------------------------------

#[test]
fn test_labels() {
    let tmp = init_project();
    let out = run_ok(tmp.path(), &["label", "updated", "3/1"]);
    assert_eq!(out, "updated: 3/1\n");
    run_ok(tmp.path(), &["label", "facility", "East Annex"]);

    let out = run_ok(tmp.path(), &["label"]);
    assert_eq!(out, "facility: East Annex\nupdated:  3/1\n");
    let out = run_ok(tmp.path(), &["show", "2026-03"]);
    assert!(out.starts_with("East Annex  2026-03  (updated 3/1)\n"));
}

#[test]
fn test_settings_set_and_show() {
    let tmp = init_project();
    let out = run_ok(tmp.path(), &["settings", "set", "history.limit", "10"]);
    assert_eq!(out, "history.limit = 10\n");
    let out = run_ok(tmp.path(), &["settings", "show"]);
    assert!(out.contains("limit = 10"));
}
