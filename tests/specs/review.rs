// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `revet review`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn clean_branch_passes() {
    let repo = repo_on_feature_branch();

    repo.revet()
        .arg("review")
        .assert()
        .success()
        .stdout(predicates::str::contains("revet review: PASS"));
}

#[test]
fn missing_companion_test_fails_the_review() {
    let repo = repo_on_feature_branch();
    repo.write("source/common/fresh.cc", "void fresh() {\n}\n");
    repo.commit_all("add fresh");

    repo.revet()
        .arg("review")
        .assert()
        .code(1)
        .stdout(predicates::str::contains(
            "Missing test file: expected test/common/fresh_test.cc",
        ))
        .stdout(predicates::str::contains("revet review: FAIL"));
}

#[test]
fn covered_change_with_test_update_passes() {
    let repo = repo_on_feature_branch();
    repo.write(
        "source/common/buffer.cc",
        "int capacity() { return 64; }\nint drain() { return 0; }\n",
    );
    repo.write(
        "test/common/buffer_test.cc",
        "TEST(BufferTest, Capacity) { EXPECT_EQ(64, capacity()); }\n\
         TEST(BufferTest, Drain) { EXPECT_EQ(0, drain()); }\n",
    );
    repo.commit_all("add drain");

    repo.revet().arg("review").assert().success();
}

#[test]
fn uncovered_enum_case_is_reported_as_an_issue() {
    let repo = repo_on_feature_branch();
    repo.write(
        "source/common/buffer.cc",
        "int capacity() { return 64; }\n\
         void handle() {\n  switch (kind) {\n  case Proto::Kind::FOO:\n    break;\n  }\n}\n",
    );
    repo.write("changelogs/current.yaml", "changes: []\n");
    repo.commit_all("handle FOO");

    repo.revet()
        .arg("review")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("FOO"));
}

#[test]
fn source_change_without_changelog_or_tests_is_an_issue() {
    let repo = repo_on_feature_branch();
    repo.write(
        "source/common/buffer.cc",
        "int capacity() { return 64; } // widened default\n",
    );
    repo.commit_all("tweak comment");

    repo.revet()
        .arg("review")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("changelogs/current.yaml"));
}

#[test]
fn uncommitted_changes_are_part_of_the_change_set() {
    let repo = repo_on_feature_branch();
    // Not committed, not even staged.
    repo.write("source/common/fresh.cc", "void fresh() {\n}\n");

    repo.revet()
        .arg("review")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("fresh_test.cc"));
}

#[test]
fn json_output_carries_the_verdict() {
    let repo = repo_on_feature_branch();

    let output = repo
        .revet()
        .args(["review", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["passed"], serde_json::json!(true));
    assert_eq!(value["files_changed"], serde_json::json!(0));
}

#[test]
fn markdown_output_has_the_report_sections() {
    let repo = repo_on_feature_branch();
    repo.write("source/common/fresh.cc", "void fresh() {\n}\n");
    repo.commit_all("add fresh");

    repo.revet()
        .args(["review", "--output", "markdown"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("# Code Review Analysis"))
        .stdout(predicates::str::contains("## Missing Tests"));
}

#[test]
fn ignored_paths_are_skipped() {
    let repo = repo_on_feature_branch();
    repo.write(
        "revet.toml",
        "version = 1\n\n[project.ignore]\npatterns = [\"**/generated/**\"]\n",
    );
    repo.write("source/generated/wire.pb.cc", "void generated() {\n}\n");
    repo.commit_all("add generated code");

    repo.revet()
        .arg("review")
        .assert()
        .success()
        .stdout(predicates::str::contains("PASS"));
}

#[test]
fn explicit_base_ref_is_honored() {
    let repo = repo_on_feature_branch();
    repo.write("source/common/fresh.cc", "void fresh() {\n}\n");
    repo.commit_all("add fresh");

    // Against its own tip the branch has no changes.
    repo.revet()
        .args(["review", "--base", "feature"])
        .assert()
        .success();
}

#[test]
fn piped_output_has_no_escape_codes() {
    let repo = repo_on_feature_branch();
    repo.write("source/common/fresh.cc", "void fresh() {\n}\n");
    repo.commit_all("add fresh");

    repo.revet()
        .arg("review")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("\u{1b}[").not());
}

#[test]
fn limit_flag_truncates_findings() {
    let repo = repo_on_feature_branch();
    for i in 0..4 {
        repo.write(
            &format!("source/common/mod{}.cc", i),
            &format!("void entry{}() {{\n}}\n", i),
        );
    }
    repo.commit_all("add modules");

    repo.revet()
        .args(["review", "--limit", "2"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("Stopped after 2 findings"));

    repo.revet()
        .args(["review", "--no-limit"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("Stopped after").not());
}
