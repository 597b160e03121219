//! Integration tests for the `tick` CLI.
//!
//! Each test creates a temp data directory, runs `tick` as a subprocess
//! with `-C`, and verifies stdout and/or the stored files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `tick` binary.
fn tick_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tick");
    path
}

/// Run `tick -C <dir>` with the given args, returning (stdout, stderr, success).
fn run_tick(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(tick_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        // Keep theme resolution independent of the host terminal
        .env_remove("COLORFGBG")
        .output()
        .expect("failed to run tick");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tick` expecting success, return stdout.
fn run_tick_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tick(dir, args);
    if !success {
        panic!(
            "tick {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Add a task and return its id (parsed from --json output).
fn add_task(dir: &Path, title: &str, desc: Option<&str>) -> String {
    let mut args = vec!["--json", "add", title];
    if let Some(d) = desc {
        args.push("--desc");
        args.push(d);
    }
    let out = run_tick_ok(dir, &args);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    parsed["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// add / list
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tick_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "no tasks");
}

#[test]
fn test_add_then_list() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_tick_ok(tmp.path(), &["add", "Buy milk", "--desc", "2 liters"]);
    assert!(out.starts_with("added "));
    assert!(out.contains("Buy milk"));

    let out = run_tick_ok(tmp.path(), &["list"]);
    assert!(out.contains("[ ] "));
    assert!(out.contains("Buy milk"));
    assert!(out.contains("    2 liters"));
    assert!(out.contains("1 active, 1 total"));
}

#[test]
fn test_add_rejects_blank_title() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tick(tmp.path(), &["add", "   "]);
    assert!(!success);
    assert!(stderr.contains("title must not be empty"));
}

#[test]
fn test_add_json_has_wire_field_names() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tick_ok(tmp.path(), &["--json", "add", "Buy milk"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["title"], "Buy milk");
    assert_eq!(parsed["completed"], false);
    assert!(parsed["createdAt"].is_i64());
    assert!(parsed.get("description").is_none());
    assert!(parsed.get("created_at").is_none());
}

#[test]
fn test_stored_payload_is_a_json_array_under_the_tasks_key() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Buy milk", Some("2 liters"));

    let payload = fs::read_to_string(tmp.path().join("@todo_tasks")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], id.as_str());
    assert_eq!(arr[0]["description"], "2 liters");
    assert!(arr[0]["createdAt"].is_i64());
}

#[test]
fn test_list_preserves_insertion_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    add_task(tmp.path(), "first", None);
    add_task(tmp.path(), "second", None);
    add_task(tmp.path(), "third", None);

    let out = run_tick_ok(tmp.path(), &["list"]);
    let first = out.find("first").unwrap();
    let second = out.find("second").unwrap();
    let third = out.find("third").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_list_filters() {
    let tmp = tempfile::TempDir::new().unwrap();
    add_task(tmp.path(), "open task", None);
    let done = add_task(tmp.path(), "done task", None);
    run_tick_ok(tmp.path(), &["toggle", &done]);

    let out = run_tick_ok(tmp.path(), &["list", "--pending"]);
    assert!(out.contains("open task"));
    assert!(!out.contains("done task"));

    let out = run_tick_ok(tmp.path(), &["list", "--completed"]);
    assert!(out.contains("done task"));
    assert!(!out.contains("open task"));
}

#[test]
fn test_list_json_counts() {
    let tmp = tempfile::TempDir::new().unwrap();
    add_task(tmp.path(), "a", None);
    let b = add_task(tmp.path(), "b", None);
    run_tick_ok(tmp.path(), &["toggle", &b]);

    let out = run_tick_ok(tmp.path(), &["--json", "list"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["active"], 1);
    assert_eq!(parsed["total"], 2);
}

// ---------------------------------------------------------------------------
// toggle / edit / rm
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Buy milk", None);

    let out = run_tick_ok(tmp.path(), &["toggle", &id]);
    assert!(out.contains("(done)"));
    let out = run_tick_ok(tmp.path(), &["toggle", &id]);
    assert!(out.contains("(pending)"));
}

#[test]
fn test_toggle_unknown_id_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    add_task(tmp.path(), "Buy milk", None);

    let (_, stderr, success) = run_tick(tmp.path(), &["toggle", "nope"]);
    assert!(!success);
    assert!(stderr.contains("task not found"));
}

#[test]
fn test_edit_title_and_clear_desc() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Buy milk", Some("2 liters"));

    let out = run_tick_ok(tmp.path(), &["--json", "edit", &id, "--title", "Buy oat milk"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["title"], "Buy oat milk");
    assert_eq!(parsed["description"], "2 liters");

    let out = run_tick_ok(tmp.path(), &["--json", "edit", &id, "--clear-desc"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed.get("description").is_none());
}

#[test]
fn test_edit_preserves_id_and_created_at() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tick_ok(tmp.path(), &["--json", "add", "Buy milk"]);
    let before: serde_json::Value = serde_json::from_str(&out).unwrap();
    let id = before["id"].as_str().unwrap();

    let out = run_tick_ok(tmp.path(), &["--json", "edit", id, "--title", "renamed"]);
    let after: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["createdAt"], before["createdAt"]);
}

#[test]
fn test_edit_with_no_flags_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Buy milk", None);

    let (_, stderr, success) = run_tick(tmp.path(), &["edit", &id]);
    assert!(!success);
    assert!(stderr.contains("nothing to change"));
}

#[test]
fn test_rm_with_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add_task(tmp.path(), "Buy milk", None);

    let out = run_tick_ok(tmp.path(), &["rm", &id, "--yes"]);
    assert!(out.contains("deleted"));

    let out = run_tick_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "no tasks");
}

#[test]
fn test_rm_unknown_id_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tick(tmp.path(), &["rm", "nope", "--yes"]);
    assert!(!success);
    assert!(stderr.contains("task not found"));
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[test]
fn test_search_matches_title_and_description() {
    let tmp = tempfile::TempDir::new().unwrap();
    add_task(tmp.path(), "Buy milk", None);
    add_task(tmp.path(), "Call mom", Some("ask about milk"));
    add_task(tmp.path(), "Walk dog", None);

    let out = run_tick_ok(tmp.path(), &["search", "MILK"]);
    assert!(out.contains("Buy milk"));
    assert!(out.contains("Call mom"));
    assert!(!out.contains("Walk dog"));
}

#[test]
fn test_search_is_literal_not_regex() {
    let tmp = tempfile::TempDir::new().unwrap();
    add_task(tmp.path(), "a+b", None);
    add_task(tmp.path(), "aab", None);

    let out = run_tick_ok(tmp.path(), &["search", "a+b"]);
    assert!(out.contains("a+b"));
    assert!(!out.contains("aab"));
}

#[test]
fn test_search_no_hits() {
    let tmp = tempfile::TempDir::new().unwrap();
    add_task(tmp.path(), "Buy milk", None);

    let out = run_tick_ok(tmp.path(), &["search", "zzz"]);
    assert!(out.contains("no tasks match \"zzz\""));
}

// ---------------------------------------------------------------------------
// theme
// ---------------------------------------------------------------------------

#[test]
fn test_theme_defaults_to_system() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_tick_ok(tmp.path(), &["theme"]);
    assert_eq!(out.trim(), "system (resolved: light)");
}

#[test]
fn test_theme_set_and_toggle() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_tick_ok(tmp.path(), &["theme", "dark"]);
    assert_eq!(out.trim(), "dark (resolved: dark)");

    // The stored token is the raw string, not JSON
    let stored = fs::read_to_string(tmp.path().join("@app_theme_preference")).unwrap();
    assert_eq!(stored, "dark");

    let out = run_tick_ok(tmp.path(), &["theme", "toggle"]);
    assert_eq!(out.trim(), "light (resolved: light)");
}

#[test]
fn test_theme_toggle_never_lands_on_system() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_tick_ok(tmp.path(), &["theme", "toggle"]);
    run_tick_ok(tmp.path(), &["theme", "toggle"]);

    let out = run_tick_ok(tmp.path(), &["--json", "theme"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_ne!(parsed["preference"], "system");
}

#[test]
fn test_theme_rejects_unknown_token() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_tick(tmp.path(), &["theme", "solarized"]);
    assert!(!success);
    assert!(stderr.contains("unknown theme"));
}

// ---------------------------------------------------------------------------
// cross-invocation state
// ---------------------------------------------------------------------------

#[test]
fn test_state_survives_separate_invocations() {
    let tmp = tempfile::TempDir::new().unwrap();
    let id = add_task(tmp.path(), "persisted", Some("still here"));
    run_tick_ok(tmp.path(), &["toggle", &id]);

    let out = run_tick_ok(tmp.path(), &["--json", "list"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let tasks = parsed["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], id.as_str());
    assert_eq!(tasks[0]["completed"], true);
    assert_eq!(tasks[0]["description"], "still here");
}

#[test]
fn test_data_dirs_are_isolated() {
    let a = tempfile::TempDir::new().unwrap();
    let b = tempfile::TempDir::new().unwrap();
    add_task(a.path(), "only in a", None);

    let out = run_tick_ok(b.path(), &["list"]);
    assert_eq!(out.trim(), "no tasks");
}
