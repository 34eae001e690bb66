//! Edge case and error handling tests for treenote


use assert_cmd::Command;
use harness::{TestRepo, run_treenote};
use predicates::prelude::*;
use std::os::unix::fs::symlink;

fn treenote(repo: &TestRepo) -> Command {
    let mut cmd = Command::cargo_bin("treenote").expect("binary should build");
    cmd.current_dir(repo.path())
        .env("NO_COLOR", "1")
        .env_remove("TREENOTE_LOG");
    cmd
}

// ============================================================================
// Fatal Errors
// ============================================================================

#[test]
fn test_check_without_config_fails() {
    let repo = TestRepo::new();
    repo.add_file("main.rs", "");

    treenote(&repo)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("structure.config.json"));
}

#[test]
fn test_build_without_config_fails() {
    let repo = TestRepo::new();

    treenote(&repo)
        .args(["build", "-c", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_missing_root_fails() {
    let repo = TestRepo::new();

    treenote(&repo)
        .args(["--root", "does-not-exist", "scan"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let repo = TestRepo::new();

    treenote(&repo)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// Malformed Documents
// ============================================================================

#[test]
fn test_malformed_config_treated_as_empty() {
    let repo = TestRepo::new();
    repo.add_file("src/main.rs", "");
    repo.add_file("structure.config.json", "{ not json");

    // Every current entry is extra against an empty desired structure.
    let out = run_treenote(repo.path(), &["check"]);
    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("main.rs"), "stdout: {}", out.stdout);
    assert!(out.stderr.contains("WARN"), "stderr: {}", out.stderr);
}

#[test]
fn test_config_with_unsupported_value() {
    let repo = TestRepo::new();
    repo.add_file("structure.config.json", r#"{"src": 42}"#);

    let out = run_treenote(repo.path(), &["check"]);
    assert_eq!(out.code, Some(1));
}

#[test]
fn test_malformed_metadata_recovered_by_backfill() {
    let repo = TestRepo::new();
    repo.add_file("lib.rs", "");
    repo.add_file("description.json", "[1, 2,");

    treenote(&repo).arg("backfill").assert().success();
    assert_eq!(
        repo.read("description.json"),
        "{\n  \"lib.rs\": \"No description available\"\n}\n"
    );
}

#[test]
fn test_malformed_metadata_renders_without_descriptions() {
    let repo = TestRepo::new();
    repo.add_file("lib.rs", "");
    repo.add_file("description.json", "not json at all");

    treenote(&repo)
        .args(["tree", "-x", "description.json"])
        .assert()
        .success()
        .stdout("└── lib.rs\n");
}

#[test]
fn test_metadata_null_values_backfilled() {
    let repo = TestRepo::new();
    repo.add_file("a.txt", "");
    repo.add_file("description.json", r#"{"a.txt": null}"#);

    treenote(&repo).args(["backfill", "--placeholder", "x"]).assert().success();
    assert_eq!(repo.read("description.json"), "{\n  \"a.txt\": \"x\"\n}\n");
}

// ============================================================================
// Backfill Collisions
// ============================================================================

#[test]
fn test_description_becomes_group_when_dir_appears() {
    let repo = TestRepo::new();
    repo.add_file("tools/run.sh", "");
    repo.add_file("description.json", r#"{"tools": "Helper scripts"}"#);

    treenote(&repo).arg("backfill").assert().success();
    let written: serde_json::Value =
        serde_json::from_str(&repo.read("description.json")).unwrap();
    assert_eq!(written["tools"]["."], "Helper scripts");
    assert_eq!(written["tools"]["run.sh"], "No description available");

    // The converted description still shows up for the directory.
    treenote(&repo)
        .args(["tree", "-x", "description.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tools - Helper scripts"));
}

#[test]
fn test_unchanged_metadata_not_rewritten() {
    let repo = TestRepo::new();
    repo.add_file("a.txt", "");
    // Compact formatting would be replaced by pretty JSON on any write.
    repo.add_file("description.json", r#"{"a.txt":"Kept"}"#);

    treenote(&repo).arg("backfill").assert().success();
    assert_eq!(repo.read("description.json"), r#"{"a.txt":"Kept"}"#);
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_filename_with_unicode() {
    let repo = TestRepo::new();
    repo.add_file("日本語/ファイル.txt", "");
    repo.add_file("émoji 🎉.md", "");

    let out = run_treenote(repo.path(), &["tree"]);
    assert!(out.success());
    assert_eq!(out.stdout, "├── 日本語\n│   └── ファイル.txt\n└── émoji 🎉.md\n");
}

#[test]
fn test_filename_with_spaces() {
    let repo = TestRepo::new();
    repo.add_file("my docs/read me.txt", "");

    let out = run_treenote(repo.path(), &["scan"]);
    assert!(out.success());
    assert!(out.stdout.contains("\"read me.txt\": null"));
}

#[test]
fn test_exclusion_is_case_insensitive() {
    let repo = TestRepo::new();
    repo.add_file("Node_Modules/pkg/index.js", "");
    repo.add_file("BUILD/out.o", "");
    repo.add_file("keep.txt", "");

    treenote(&repo)
        .args(["-x", "build", "scan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.txt"))
        .stdout(predicate::str::contains("Node_Modules").not())
        .stdout(predicate::str::contains("BUILD").not());
}

#[test]
fn test_exclusion_glob_applies_at_any_depth() {
    let repo = TestRepo::new();
    repo.add_file("src/main.rs", "");
    repo.add_file("src/debug.LOG", "");
    repo.add_file("trace.log", "");

    treenote(&repo)
        .args(["-x", "*.log", "tree"])
        .assert()
        .success()
        .stdout("└── src\n    └── main.rs\n");
}

#[test]
fn test_sorting_order() {
    let repo = TestRepo::new();
    repo.add_file("zebra.txt", "");
    repo.add_file("Apple.txt", "");
    repo.add_file("banana/x", "");
    repo.add_file("Cherry/y", "");

    let out = run_treenote(repo.path(), &["tree"]);
    assert!(out.success());
    let names: Vec<&str> = out
        .stdout
        .lines()
        .filter(|l| !l.starts_with('│') && !l.starts_with(' '))
        .collect();
    assert_eq!(
        names,
        vec!["├── banana", "├── Cherry", "├── Apple.txt", "└── zebra.txt"]
    );
}

// ============================================================================
// Symlinks
// ============================================================================

#[test]
fn test_broken_symlink_skipped() {
    let repo = TestRepo::new();
    repo.add_file("real.txt", "");
    symlink(repo.path().join("nowhere"), repo.path().join("dangling"))
        .expect("Failed to create symlink");

    let out = run_treenote(repo.path(), &["tree"]);
    assert!(out.success());
    assert_eq!(out.stdout, "└── real.txt\n");
}

#[test]
fn test_symlink_to_file_listed() {
    let repo = TestRepo::new();
    repo.add_file("target.txt", "");
    symlink(repo.path().join("target.txt"), repo.path().join("link.txt"))
        .expect("Failed to create symlink");

    let out = run_treenote(repo.path(), &["scan"]);
    assert!(out.success());
    assert!(out.stdout.contains("link.txt"));
}

// ============================================================================
// Scale
// ============================================================================

#[test]
fn test_very_deep_nesting() {
    let repo = TestRepo::new();
    let deep = (0..40).map(|i| format!("d{i}")).collect::<Vec<_>>().join("/");
    repo.add_file(&format!("{deep}/leaf.txt"), "");

    let out = run_treenote(repo.path(), &["tree"]);
    assert!(out.success());
    assert_eq!(out.stdout.lines().count(), 41);
    assert!(out.stdout.ends_with("└── leaf.txt\n"));
}

#[test]
fn test_empty_directory() {
    let repo = TestRepo::new();

    let out = run_treenote(repo.path(), &["tree"]);
    assert!(out.success());
    assert!(out.stdout.is_empty());

    let out = run_treenote(repo.path(), &["scan"]);
    assert!(out.success());
    assert_eq!(out.stdout.trim(), "{}");
}
