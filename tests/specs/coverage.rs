// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `revet coverage`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// Repository with one commit on main and an llvm-cov style report.
fn repo_with_report(percent: &str) -> TestRepo {
    let repo = TestRepo::new();
    repo.write("source/common/buffer.cc", "int capacity() { return 64; }\n");
    repo.commit_all("initial");
    repo.write(
        "coverage.txt",
        &format!("Filename  Lines  Covered  Percent\nTOTAL  150000  148500  {}%\n", percent),
    );
    repo
}

#[test]
fn save_then_summary_round_trips() {
    let repo = repo_with_report("85.50");

    repo.revet()
        .args(["coverage", "save", "--file", "coverage.txt"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Saved coverage for 'main'"))
        .stdout(predicates::str::contains("Coverage: 85.50%"));

    repo.revet()
        .args(["coverage", "summary"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Coverage summary for 'main'"))
        .stdout(predicates::str::contains("85.50%"))
        .stdout(predicates::str::contains("Lines: 148500 / 150000"));
}

#[test]
fn fresh_snapshot_passes_the_stale_check() {
    let repo = repo_with_report("85.50");

    repo.revet()
        .args(["coverage", "save", "--file", "coverage.txt"])
        .assert()
        .success();

    repo.revet()
        .args(["coverage", "stale"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Fresh"));
}

#[test]
fn new_commits_make_a_snapshot_stale() {
    let repo = repo_with_report("85.50");

    repo.revet()
        .args(["coverage", "save", "--file", "coverage.txt"])
        .assert()
        .success();

    repo.write("source/common/buffer.cc", "int capacity() { return 128; }\n");
    repo.commit_all("bump capacity");

    repo.revet()
        .args(["coverage", "stale"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("new commits"));
}

#[test]
fn missing_snapshot_is_stale() {
    let repo = repo_with_report("85.50");

    repo.revet()
        .args(["coverage", "stale"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("no snapshot for branch 'main'"));
}

#[test]
fn compare_flags_a_regression() {
    let repo = repo_with_report("85.50");
    repo.revet()
        .args(["coverage", "save", "--file", "coverage.txt"])
        .assert()
        .success();

    repo.write(
        "coverage.txt",
        "TOTAL  150000  147750  85.00%\n",
    );

    repo.revet()
        .args(["coverage", "compare", "--with", "main", "--file", "coverage.txt"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("Difference: -0.50%"))
        .stdout(predicates::str::contains("regression"));
}

#[test]
fn compare_tolerates_noise() {
    let repo = repo_with_report("85.50");
    repo.revet()
        .args(["coverage", "save", "--file", "coverage.txt"])
        .assert()
        .success();

    repo.write(
        "coverage.txt",
        "TOTAL  150000  148400  85.45%\n",
    );

    repo.revet()
        .args(["coverage", "compare", "--with", "main", "--file", "coverage.txt"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Assessment: no change"));
}

#[test]
fn compare_without_a_base_snapshot_is_an_error() {
    let repo = repo_with_report("85.50");

    repo.revet()
        .args(["coverage", "compare", "--with", "main", "--file", "coverage.txt"])
        .assert()
        .code(3)
        .stderr(predicates::str::contains("no snapshot for base branch 'main'"));
}

#[test]
fn missing_report_file_is_reported() {
    let repo = TestRepo::new();
    repo.write("README.md", "hi\n");
    repo.commit_all("initial");

    repo.revet()
        .args(["coverage", "save", "--file", "nope.txt"])
        .assert()
        .code(3)
        .stderr(predicates::str::contains("coverage report not found"));
}

#[test]
fn clean_removes_everything_with_a_zero_cutoff() {
    let repo = repo_with_report("85.50");
    repo.revet()
        .args(["coverage", "save", "--file", "coverage.txt"])
        .assert()
        .success();

    repo.revet()
        .args(["coverage", "clean", "--older-than", "0"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Removed: main.json"))
        .stdout(predicates::str::contains("Cleaned 1 snapshot"));

    repo.revet()
        .args(["coverage", "summary"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("No snapshot for branch 'main'"));
}

#[test]
fn explicit_branch_overrides_head() {
    let repo = repo_with_report("85.50");
    repo.checkout_new("feature");

    repo.revet()
        .args(["coverage", "save", "--branch", "main", "--file", "coverage.txt"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Saved coverage for 'main'"));
}
