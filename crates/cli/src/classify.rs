// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Changed-path categorization and companion-test path rewriting.
//!
//! Categorization is a prefix/suffix lookup over the configured layout,
//! checked in a fixed order. The first matching rule wins.

use serde::Serialize;

use crate::config::ProjectConfig;

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;

/// Coarse category of a changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Source,
    Test,
    Build,
    Api,
    Docs,
    Other,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Source => "source",
            FileCategory::Test => "test",
            FileCategory::Build => "build",
            FileCategory::Api => "api",
            FileCategory::Docs => "docs",
            FileCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorize a repo-relative path.
///
/// Test files co-located under the source root (named with the test
/// infix) still count as tests.
pub fn classify(project: &ProjectConfig, path: &str) -> FileCategory {
    if path.starts_with(&project.source_root) {
        if path.contains("_test") {
            return FileCategory::Test;
        }
        return FileCategory::Source;
    }
    if path.starts_with(&project.test_root) {
        return FileCategory::Test;
    }
    if path.starts_with(&project.api_root) {
        return FileCategory::Api;
    }
    if path.starts_with(&project.docs_root) {
        return FileCategory::Docs;
    }
    if path.contains("BUILD") || path.ends_with(".bzl") {
        return FileCategory::Build;
    }
    if path.ends_with(".md") || path.ends_with(".rst") {
        return FileCategory::Docs;
    }
    FileCategory::Other
}

/// True for paths that get symbol extraction: source-category files with
/// the recognized body or header extension.
pub fn is_reviewable_source(project: &ProjectConfig, path: &str) -> bool {
    classify(project, path) == FileCategory::Source
        && (has_ext(path, &project.source_ext) || has_ext(path, &project.header_ext))
}

/// Compute the companion test path for a source file.
///
/// The source root segment is swapped for the test root. Body files get
/// the test infix before their extension; headers swap their extension
/// for the full test suffix. Returns `None` for paths outside the source
/// root or with an unrecognized extension.
pub fn expected_test_path(project: &ProjectConfig, path: &str) -> Option<String> {
    let rest = path.strip_prefix(&project.source_root)?;

    let body_ext = format!(".{}", project.source_ext);
    if let Some(stem) = rest.strip_suffix(&body_ext) {
        return Some(format!("{}{}{}", project.test_root, stem, project.test_suffix));
    }

    let header_ext = format!(".{}", project.header_ext);
    if let Some(stem) = rest.strip_suffix(&header_ext) {
        return Some(format!("{}{}{}", project.test_root, stem, project.test_suffix));
    }

    None
}

fn has_ext(path: &str, ext: &str) -> bool {
    path.rsplit_once('.').is_some_and(|(_, e)| e == ext)
}
