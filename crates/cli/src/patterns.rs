// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Anti-pattern scanning over added lines.
//!
//! Every rule has a trigger over the added-lines text and an optional
//! secondary condition that can look at the whole file. A rule fires at
//! most once per file regardless of how many lines trip it. Rules that
//! need the full file text stay quiet when that text is unavailable.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use serde::Serialize;

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod tests;

/// Finding severity, in descending order of weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the review.
    Issue,
    /// Worth a look, never blocking.
    Warning,
    /// Stylistic or advisory.
    Suggestion,
}

/// One fired rule for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternFinding {
    pub file: String,
    pub severity: Severity,
    pub message: String,
}

// Keywords that suggest a behavior-breaking change, matched without case.
#[allow(clippy::unwrap_used)] // constant patterns
static BREAKING_KEYWORDS: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(["deprecated", "remove", "delete", "breaking"])
        .unwrap()
});

/// Marker that gates risky behavior behind a runtime flag.
const RUNTIME_GUARD: &str = "runtimeFeatureEnabled";

/// Scan one file's added lines, with the full file text when readable.
///
/// `full_text` is `None` when the resulting file could not be read (for
/// example the change deletes it); rules whose secondary condition needs
/// it are skipped rather than guessed.
pub fn scan(file: &str, added: &str, full_text: Option<&str>) -> Vec<PatternFinding> {
    let mut findings = Vec::new();
    let mut push = |severity: Severity, message: &str| {
        findings.push(PatternFinding {
            file: file.to_string(),
            severity,
            message: message.to_string(),
        });
    };

    if added.contains("time(") || added.contains("time_t") {
        push(
            Severity::Warning,
            "Direct time() call - use the injected time source for testability",
        );
    }

    if added.contains("shared_ptr") && !added.contains("unique_ptr") {
        push(
            Severity::Warning,
            "New shared_ptr usage - check whether unique_ptr suffices",
        );
    }

    if let Some(full) = full_text
        && added.to_lowercase().contains("mutex")
        && !full.contains("GUARDED_BY")
    {
        push(Severity::Warning, "Mutex without GUARDED_BY annotation");
    }

    if added.contains("ASSERT(") && !added.contains("RELEASE_ASSERT(") {
        push(
            Severity::Suggestion,
            "ASSERT() compiles out of release builds - consider RELEASE_ASSERT() for invariants \
             that must hold in production",
        );
    }

    if let Some(full) = full_text
        && BREAKING_KEYWORDS.is_match(added)
        && !full.contains(RUNTIME_GUARD)
    {
        push(
            Severity::Suggestion,
            "Potentially breaking change - consider guarding it behind a runtime feature flag",
        );
    }

    findings
}
