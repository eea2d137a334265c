// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for revet.toml handling.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

#[test]
fn unknown_top_level_key_warns_but_does_not_fail() {
    let repo = repo_on_feature_branch();
    repo.write("revet.toml", "version = 1\nreviwe = true\n");
    repo.commit_all("add config");

    repo.revet()
        .arg("review")
        .assert()
        .success()
        .stderr(predicates::str::contains("unrecognized field `reviwe`"));
}

#[test]
fn unknown_project_key_warns_with_its_path() {
    let repo = repo_on_feature_branch();
    repo.write(
        "revet.toml",
        "version = 1\n\n[project]\ntest_sufix = \"_test.cc\"\n",
    );
    repo.commit_all("add config");

    repo.revet()
        .arg("review")
        .assert()
        .success()
        .stderr(predicates::str::contains(
            "unrecognized field `project.test_sufix`",
        ));
}

#[test]
fn unsupported_version_is_a_config_error() {
    let repo = repo_on_feature_branch();
    repo.write("revet.toml", "version = 2\n");

    repo.revet()
        .arg("review")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported config version 2"));
}

#[test]
fn missing_version_is_a_config_error() {
    let repo = repo_on_feature_branch();
    repo.write("revet.toml", "[project]\nname = \"demo\"\n");

    repo.revet()
        .arg("review")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("version"));
}

#[test]
fn custom_layout_drives_test_path_expectations() {
    let repo = repo_on_feature_branch();
    repo.write(
        "revet.toml",
        "version = 1\n\n[project]\nsource_root = \"src/\"\ntest_root = \"tests/\"\ntest_suffix = \"_spec.cc\"\n",
    );
    repo.write("src/engine.cc", "void engine() {\n}\n");
    repo.commit_all("add engine");

    repo.revet()
        .arg("review")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("tests/engine_spec.cc"));
}

#[test]
fn explicit_config_path_overrides_discovery() {
    let repo = repo_on_feature_branch();
    repo.write("configs/revet.toml", "version = 2\n");

    repo.revet()
        .args(["review", "--config", "configs/revet.toml"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported config version"));
}
