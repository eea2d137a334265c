// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unit tests for the git change source, against throwaway repositories.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::process::Command;

use tempfile::TempDir;

use super::*;

// =============================================================================
// TEST HELPERS
// =============================================================================

fn git(temp: &TempDir, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(temp.path())
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo(temp: &TempDir) {
    git(temp, &["init", "--initial-branch=main"]);
    git(temp, &["config", "user.email", "test@example.com"]);
    git(temp, &["config", "user.name", "Test User"]);
}

fn write_file(temp: &TempDir, path: &str, content: &str) {
    let full = temp.path().join(path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(full, content).unwrap();
}

fn commit_all(temp: &TempDir, message: &str) {
    git(temp, &["add", "-A"]);
    git(temp, &["commit", "-m", message]);
}

/// Repo with one commit on main and a feature branch checked out.
fn repo_on_feature_branch(temp: &TempDir) {
    init_repo(temp);
    write_file(temp, "source/common/base.cc", "int base() { return 0; }\n");
    commit_all(temp, "initial");
    git(temp, &["checkout", "-b", "feature"]);
}

// =============================================================================
// DISCOVERY
// =============================================================================

#[test]
fn is_git_repo_detects_repositories() {
    let temp = TempDir::new().unwrap();
    assert!(!is_git_repo(temp.path()));

    init_repo(&temp);
    assert!(is_git_repo(temp.path()));
}

#[test]
fn discover_root_finds_the_working_tree_from_a_subdirectory() {
    let temp = TempDir::new().unwrap();
    init_repo(&temp);
    std::fs::create_dir_all(temp.path().join("source/common")).unwrap();

    let root = discover_root(&temp.path().join("source/common")).unwrap();
    assert_eq!(
        root.canonicalize().unwrap(),
        temp.path().canonicalize().unwrap()
    );
}

#[test]
fn discover_root_outside_a_repo_is_fatal() {
    let temp = TempDir::new().unwrap();

    assert!(matches!(
        discover_root(temp.path()),
        Err(Error::NotARepository { .. })
    ));
}

#[test]
fn open_outside_a_repo_is_fatal() {
    let temp = TempDir::new().unwrap();

    assert!(matches!(
        GitChanges::open(temp.path(), None),
        Err(Error::NotARepository { .. })
    ));
}

#[test]
fn unresolvable_base_ref_is_a_git_error() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    assert!(matches!(
        GitChanges::open(temp.path(), Some("no-such-branch")),
        Err(Error::Git { .. })
    ));
}

#[test]
fn base_branch_detection_prefers_main() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    let repo = git2::Repository::discover(temp.path()).unwrap();
    assert_eq!(detect_base_branch(&repo), Some("main".to_string()));
}

#[test]
fn base_branch_detection_falls_back_to_master() {
    let temp = TempDir::new().unwrap();
    git(&temp, &["init", "--initial-branch=master"]);
    git(&temp, &["config", "user.email", "test@example.com"]);
    git(&temp, &["config", "user.name", "Test User"]);
    write_file(&temp, "a.txt", "a\n");
    commit_all(&temp, "initial");

    let repo = git2::Repository::discover(temp.path()).unwrap();
    assert_eq!(detect_base_branch(&repo), Some("master".to_string()));
}

// =============================================================================
// CHANGED FILES
// =============================================================================

#[test]
fn committed_staged_and_unstaged_changes_are_all_listed() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    write_file(&temp, "source/common/committed.cc", "int c() { return 1; }\n");
    commit_all(&temp, "add committed");

    write_file(&temp, "source/common/staged.cc", "int s() { return 2; }\n");
    git(&temp, &["add", "source/common/staged.cc"]);

    write_file(&temp, "source/common/base.cc", "int base() { return 9; }\n");

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    let files = changes.changed_files().unwrap();

    assert_eq!(
        files,
        vec![
            "source/common/base.cc".to_string(),
            "source/common/committed.cc".to_string(),
            "source/common/staged.cc".to_string(),
        ]
    );
}

#[test]
fn untracked_files_count_as_additions() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    write_file(&temp, "source/common/fresh.cc", "void fresh() {\n}\n");

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    let files = changes.changed_files().unwrap();
    assert_eq!(files, vec!["source/common/fresh.cc".to_string()]);

    let text = changes.diff_text("source/common/fresh.cc").unwrap();
    let (added, removed) = crate::diff::count_changes(&text);
    assert_eq!((added, removed), (2, 0));
}

#[test]
fn changed_files_are_sorted_and_deduplicated() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    // Same file changed in a commit and again in the working tree.
    write_file(&temp, "source/common/base.cc", "int base() { return 1; }\n");
    commit_all(&temp, "tweak base");
    write_file(&temp, "source/common/base.cc", "int base() { return 2; }\n");

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    let files = changes.changed_files().unwrap();

    assert_eq!(files, vec!["source/common/base.cc".to_string()]);
}

#[test]
fn clean_branch_has_no_changed_files() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    assert!(changes.changed_files().unwrap().is_empty());
}

// =============================================================================
// DIFF TEXT
// =============================================================================

#[test]
fn diff_text_round_trips_through_the_cursor() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    write_file(
        &temp,
        "source/common/base.cc",
        "int base() { return 0; }\nint extra() { return 7; }\n",
    );
    commit_all(&temp, "add extra");

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    let text = changes.diff_text("source/common/base.cc").unwrap();

    assert!(text.contains("@@"));

    let added: Vec<_> = crate::diff::DiffCursor::new(&text)
        .filter(|l| l.is_added())
        .map(|l| l.text.to_string())
        .collect();
    assert_eq!(added, vec!["int extra() { return 7; }".to_string()]);
}

#[test]
fn unchanged_path_yields_empty_diff_text() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    assert_eq!(changes.diff_text("source/common/base.cc").unwrap(), "");
}

#[test]
fn new_file_diff_covers_every_line() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    write_file(&temp, "source/common/fresh.cc", "void fresh() {\n}\n");
    commit_all(&temp, "add fresh");

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    let text = changes.diff_text("source/common/fresh.cc").unwrap();

    let (added, removed) = crate::diff::count_changes(&text);
    assert_eq!((added, removed), (2, 0));
}

#[test]
fn base_drift_does_not_leak_into_the_change_set() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    write_file(&temp, "source/common/mine.cc", "int mine() { return 3; }\n");
    commit_all(&temp, "my change");

    // Someone lands an unrelated change on main after the branch forked.
    git(&temp, &["checkout", "main"]);
    write_file(&temp, "source/common/theirs.cc", "int theirs() { return 4; }\n");
    commit_all(&temp, "their change");
    git(&temp, &["checkout", "feature"]);

    let changes = GitChanges::open(temp.path(), Some("main")).unwrap();
    let files = changes.changed_files().unwrap();

    assert_eq!(files, vec!["source/common/mine.cc".to_string()]);
}

// =============================================================================
// BRANCH METADATA
// =============================================================================

#[test]
fn branch_commit_resolves_a_full_sha() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    let sha = branch_commit(temp.path(), "main").unwrap();
    assert_eq!(sha.len(), 40);
    assert!(sha.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn current_branch_names_the_checked_out_branch() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    assert_eq!(
        current_branch(temp.path()).unwrap(),
        Some("feature".to_string())
    );
}

#[test]
fn branch_commit_time_is_recent() {
    let temp = TempDir::new().unwrap();
    repo_on_feature_branch(&temp);

    let when = branch_commit_time(temp.path(), "main").unwrap();
    let age = Utc::now().signed_duration_since(when);
    assert!(age.num_hours() < 24);
}
