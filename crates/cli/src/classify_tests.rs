// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

fn project() -> ProjectConfig {
    ProjectConfig::default()
}

#[parameterized(
    source_body = { "source/common/buffer/buffer_impl.cc", FileCategory::Source },
    source_header = { "source/common/buffer/buffer_impl.h", FileCategory::Source },
    colocated_test = { "source/common/buffer/buffer_test_util.cc", FileCategory::Test },
    test_tree = { "test/common/buffer/buffer_impl_test.cc", FileCategory::Test },
    api_proto = { "api/envoy/config/route.proto", FileCategory::Api },
    docs_tree = { "docs/root/intro.rst", FileCategory::Docs },
    bazel_build = { "source2/BUILD", FileCategory::Build },
    bzl_macro = { "bazel/repositories.bzl", FileCategory::Build },
    loose_markdown = { "SECURITY.md", FileCategory::Docs },
    loose_rst = { "STYLE.rst", FileCategory::Docs },
    changelog_yaml = { "changelogs/current.yaml", FileCategory::Other },
    script = { "tools/gen_compilation_database.py", FileCategory::Other },
)]
fn classify_paths(path: &str, expected: FileCategory) {
    assert_eq!(classify(&project(), path), expected);
}

#[test]
fn source_root_prefix_wins_over_build_suffix() {
    // BUILD files under source/ keep the source category; the prefix
    // rules are checked first.
    assert_eq!(classify(&project(), "source/common/BUILD"), FileCategory::Source);
}

#[parameterized(
    body_file = { "source/common/buffer/buffer_impl.cc", Some("test/common/buffer/buffer_impl_test.cc") },
    header_file = { "source/common/buffer/buffer_impl.h", Some("test/common/buffer/buffer_impl_test.cc") },
    outside_source = { "tools/helper.cc", None },
    unrecognized_ext = { "source/common/data.json", None },
)]
fn companion_test_paths(path: &str, expected: Option<&str>) {
    assert_eq!(expected_test_path(&project(), path).as_deref(), expected);
}

#[parameterized(
    body = { "source/common/buffer/buffer_impl.cc", true },
    header = { "source/common/buffer/buffer_impl.h", true },
    build_file = { "source/common/BUILD", false },
    test_file = { "test/common/buffer/buffer_impl_test.cc", false },
    doc = { "docs/root/intro.rst", false },
)]
fn reviewable_source_detection(path: &str, expected: bool) {
    assert_eq!(is_reviewable_source(&project(), path), expected);
}

#[test]
fn custom_layout_is_honored() {
    let project = ProjectConfig {
        source_root: "src/".to_string(),
        test_root: "unittests/".to_string(),
        source_ext: "cpp".to_string(),
        header_ext: "hpp".to_string(),
        test_suffix: "_ut.cpp".to_string(),
        ..ProjectConfig::default()
    };

    assert_eq!(classify(&project, "src/engine/run.cpp"), FileCategory::Source);
    assert_eq!(
        expected_test_path(&project, "src/engine/run.cpp").as_deref(),
        Some("unittests/engine/run_ut.cpp")
    );
    assert_eq!(
        expected_test_path(&project, "src/engine/run.hpp").as_deref(),
        Some("unittests/engine/run_ut.cpp")
    );
}
