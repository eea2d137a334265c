// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report aggregation across all changed files.
//!
//! [`aggregate`] takes the finalized per-file analyses, in the order the
//! change source returned them, and merges them into one immutable
//! [`ReviewReport`]. The merge is read-only: per-file data is moved in
//! untouched, cross-file text lists are de-duplicated by exact equality
//! keeping the first occurrence, and a handful of change-set-wide checks
//! fire on the combined picture.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyze::FileAnalysis;
use crate::classify::FileCategory;
use crate::config::ProjectConfig;

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// A source file whose companion test file does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTest {
    pub source: String,
    pub expected_test: String,
}

/// The complete result of one review run. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReport {
    /// When the report was generated.
    pub timestamp: DateTime<Utc>,
    pub files_changed: usize,
    pub source_files: Vec<String>,
    pub test_files: Vec<String>,
    pub build_files: Vec<String>,
    pub api_files: Vec<String>,
    pub docs_files: Vec<String>,
    pub lines_added: u64,
    pub lines_removed: u64,
    /// Whether the configured changelog file is part of the change set.
    pub release_notes_updated: bool,
    pub missing_tests: Vec<MissingTest>,
    /// De-duplicated, first-seen order.
    pub issues: Vec<String>,
    /// De-duplicated, first-seen order.
    pub warnings: Vec<String>,
    /// De-duplicated, first-seen order.
    pub suggestions: Vec<String>,
    pub files: Vec<FileAnalysis>,
    /// False iff the de-duplicated issue list is non-empty.
    pub passed: bool,
}

/// Merge per-file analyses into the final report.
///
/// `analyses` must already be in change-source order; that order fixes
/// both the file list and the first-seen de-duplication of the text
/// lists, making the report reproducible.
pub fn aggregate(project: &ProjectConfig, analyses: Vec<FileAnalysis>) -> ReviewReport {
    let mut source_files = Vec::new();
    let mut test_files = Vec::new();
    let mut build_files = Vec::new();
    let mut api_files = Vec::new();
    let mut docs_files = Vec::new();

    let mut lines_added = 0;
    let mut lines_removed = 0;

    let mut issues = Dedup::new();
    let mut warnings = Dedup::new();
    let mut suggestions = Dedup::new();
    let mut missing_tests = Vec::new();

    for analysis in &analyses {
        match analysis.category {
            FileCategory::Source => source_files.push(analysis.path.clone()),
            FileCategory::Test => test_files.push(analysis.path.clone()),
            FileCategory::Build => build_files.push(analysis.path.clone()),
            FileCategory::Api => api_files.push(analysis.path.clone()),
            FileCategory::Docs => docs_files.push(analysis.path.clone()),
            FileCategory::Other => {}
        }

        lines_added += analysis.lines_added;
        lines_removed += analysis.lines_removed;

        for text in &analysis.issues {
            issues.push(text);
        }
        for text in &analysis.warnings {
            warnings.push(text);
        }
        for text in &analysis.suggestions {
            suggestions.push(text);
        }

        if let Some(expected) = &analysis.expected_test
            && !analysis.has_test
        {
            missing_tests.push(MissingTest {
                source: analysis.path.clone(),
                expected_test: expected.clone(),
            });
        }
    }

    let release_notes_updated = analyses.iter().any(|a| a.path == project.changelog);

    // Change-set-wide checks fire on the combined picture, after the
    // per-file merge.
    if !source_files.is_empty() && test_files.is_empty() && !release_notes_updated {
        issues.push(&format!(
            "Source files modified but {} not updated. Add a release note if this change \
             affects users.",
            project.changelog
        ));
    }

    if !source_files.is_empty() && test_files.is_empty() {
        suggestions
            .push("Only source files modified without test updates. Verify existing tests cover new code paths.");
    }

    if !api_files.is_empty() {
        suggestions.push("API files modified. Ensure inline documentation is complete.");
    }

    let issues = issues.into_vec();
    let passed = issues.is_empty();

    ReviewReport {
        timestamp: Utc::now(),
        files_changed: analyses.len(),
        source_files,
        test_files,
        build_files,
        api_files,
        docs_files,
        lines_added,
        lines_removed,
        release_notes_updated,
        missing_tests,
        issues,
        warnings: warnings.into_vec(),
        suggestions: suggestions.into_vec(),
        files: analyses,
        passed,
    }
}

/// Ordered list that drops exact duplicates, keeping the first.
struct Dedup {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl Dedup {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        if self.seen.insert(text.to_string()) {
            self.items.push(text.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}
