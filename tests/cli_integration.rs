//! Integration tests for the `tuido` CLI.
//!
//! Each test points `tuido` at a temp config directory, runs it as a
//! subprocess, and checks stdout and the files it leaves behind.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn tuido(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tuido"))
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn first_run_creates_default_store() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("tuido");
    let out = tuido(&dir, &["list"]);
    assert!(out.status.success());

    assert!(dir.join("tasks.json").exists());
    assert!(dir.join("keybinds.json").exists());
    let text = stdout(&out);
    assert!(text.contains("Work (2)"));
    assert!(text.contains("  [x] Task 2"));
}

#[test]
fn list_filters_by_context() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("tasks.json"),
        r#"[{"task":"Plan trip","checked":false,"context":"Home","priority":"high","tags":["summer"]},
            {"task":"Expenses","checked":true,"context":"Office"}]"#,
    )
    .unwrap();

    let out = tuido(tmp.path(), &["list", "--context", "Home"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Home (1)\n  [ ] !!! Plan trip [#summer]\n");

    let out = tuido(tmp.path(), &["list", "--context", "Garden"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: no such context: Garden"));
}

#[test]
fn stats_json() {
    let tmp = TempDir::new().unwrap();
    let out = tuido(tmp.path(), &["stats", "--json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["completed"], 1);
}

#[test]
fn corrupt_task_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), "{ not json").unwrap();
    let out = tuido(tmp.path(), &["list", "--json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json[0]["context"], "Work");
    // Read-only commands never rewrite the file
    assert_eq!(
        fs::read_to_string(tmp.path().join("tasks.json")).unwrap(),
        "{ not json"
    );
}
