// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file analysis pipeline.
//!
//! [`Analyzer::analyze_file`] drives one changed file through diff
//! parsing, pattern scanning, symbol extraction, and coverage evaluation,
//! accumulating results in a builder that finalizes into an immutable
//! [`FileAnalysis`]. Collaborators are traits so the pipeline runs against
//! fakes in tests and git/filesystem in production.

use serde::Serialize;

use crate::classify::{self, FileCategory};
use crate::config::Config;
use crate::coverage::{self, CoverageGap};
use crate::diff::{self, DiffCursor, DiffLine, LineOrigin};
use crate::error::Result;
use crate::patterns::{self, PatternFinding, Severity};
use crate::symbols::{self, SymbolRecord};

#[cfg(test)]
#[path = "analyze_tests.rs"]
mod tests;

/// Where changed paths and their diffs come from.
pub trait ChangeSource {
    /// All changed paths, repo-relative, in deterministic order.
    fn changed_files(&self) -> Result<Vec<String>>;

    /// Unified diff text for one path. Empty string means no changes.
    fn diff_text(&self, path: &str) -> Result<String>;
}

/// Where current file contents come from.
pub trait TextSource {
    fn exists(&self, path: &str) -> bool;

    fn read_text(&self, path: &str) -> Result<String>;
}

/// How far coverage verification got for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum Verification {
    /// Symbols were evaluated against the companion test text.
    Evaluated,
    /// Nothing needed evaluation (no symbols, missing test, or not a
    /// source file).
    Skipped,
    /// An input was unreadable; symbols are assumed covered.
    Unverified(String),
}

/// Everything learned about one changed file. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    pub path: String,
    pub category: FileCategory,
    pub lines_added: u64,
    pub lines_removed: u64,
    /// Whether the companion test file exists. Only meaningful when
    /// `expected_test` is set.
    pub has_test: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_test: Option<String>,
    pub verification: Verification,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<SymbolRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gaps: Vec<CoverageGap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<PatternFinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Accumulates one file's results, then finalizes.
pub struct FileAnalysisBuilder {
    analysis: FileAnalysis,
}

impl FileAnalysisBuilder {
    pub fn new(path: impl Into<String>, category: FileCategory) -> Self {
        Self {
            analysis: FileAnalysis {
                path: path.into(),
                category,
                lines_added: 0,
                lines_removed: 0,
                has_test: false,
                expected_test: None,
                verification: Verification::Skipped,
                symbols: Vec::new(),
                gaps: Vec::new(),
                findings: Vec::new(),
                issues: Vec::new(),
                warnings: Vec::new(),
                suggestions: Vec::new(),
            },
        }
    }

    pub fn lines(&mut self, added: u64, removed: u64) -> &mut Self {
        self.analysis.lines_added = added;
        self.analysis.lines_removed = removed;
        self
    }

    pub fn expected_test(&mut self, path: impl Into<String>, exists: bool) -> &mut Self {
        self.analysis.expected_test = Some(path.into());
        self.analysis.has_test = exists;
        self
    }

    pub fn push_issue(&mut self, text: impl Into<String>) -> &mut Self {
        self.analysis.issues.push(text.into());
        self
    }

    pub fn push_warning(&mut self, text: impl Into<String>) -> &mut Self {
        self.analysis.warnings.push(text.into());
        self
    }

    pub fn push_suggestion(&mut self, text: impl Into<String>) -> &mut Self {
        self.analysis.suggestions.push(text.into());
        self
    }

    /// Record a pattern finding, routing its message by severity.
    pub fn push_finding(&mut self, finding: PatternFinding) -> &mut Self {
        match finding.severity {
            Severity::Issue => self.analysis.issues.push(finding.message.clone()),
            Severity::Warning => self.analysis.warnings.push(finding.message.clone()),
            Severity::Suggestion => self.analysis.suggestions.push(finding.message.clone()),
        }
        self.analysis.findings.push(finding);
        self
    }

    /// Mark the file as unverifiable. Downgrades confidence, never adds
    /// to the issue count.
    pub fn record_unverified(&mut self, reason: impl Into<String>) -> &mut Self {
        let reason = reason.into();
        self.analysis
            .warnings
            .push(format!("Could not verify {}: {}", self.analysis.path, reason));
        self.analysis.verification = Verification::Unverified(reason);
        self
    }

    pub fn symbols(&mut self, symbols: Vec<SymbolRecord>) -> &mut Self {
        self.analysis.symbols = symbols;
        self
    }

    /// Record evaluated gaps, routing each into the issue or warning list
    /// by symbol kind. Enum cases are high confidence; callables are not.
    /// An earlier Unverified state is sticky: the file stays visibly
    /// degraded even when the test text itself was readable.
    pub fn record_gaps(&mut self, gaps: Vec<CoverageGap>, test_path: &str) -> &mut Self {
        for gap in &gaps {
            match gap.symbol.kind {
                symbols::SymbolKind::EnumCase => {
                    self.analysis.issues.push(format!(
                        "Code without test coverage: {} ({})",
                        gap.reason, test_path
                    ));
                }
                symbols::SymbolKind::Callable => {
                    self.analysis.warnings.push(format!(
                        "Possible coverage gap: {} ({})",
                        gap.reason, test_path
                    ));
                }
            }
        }
        self.analysis.gaps = gaps;
        if !matches!(self.analysis.verification, Verification::Unverified(_)) {
            self.analysis.verification = Verification::Evaluated;
        }
        self
    }

    pub fn finish(self) -> FileAnalysis {
        self.analysis
    }
}

/// Runs the per-file pipeline against a pair of collaborators.
pub struct Analyzer<'a> {
    config: &'a Config,
}

impl<'a> Analyzer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Analyze one changed file. Recoverable failures degrade the file to
    /// "could not verify" instead of aborting the run.
    pub fn analyze_file(
        &self,
        path: &str,
        changes: &dyn ChangeSource,
        files: &dyn TextSource,
    ) -> FileAnalysis {
        let project = &self.config.project;
        let category = classify::classify(project, path);
        let mut builder = FileAnalysisBuilder::new(path, category);

        let diff_text = match changes.diff_text(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path, error = %e, "diff unavailable");
                builder.record_unverified(format!("diff unavailable ({})", e));
                return builder.finish();
            }
        };

        let lines: Vec<DiffLine<'_>> = DiffCursor::new(&diff_text).collect();
        let (added, removed) = count_lines(&lines);
        builder.lines(added, removed);

        match category {
            FileCategory::Source => {
                self.analyze_source(path, &lines, files, &mut builder);
            }
            FileCategory::Test => {
                for name in deleted_tests(&lines) {
                    builder.push_warning(format!("Test removed: {} ({})", name, path));
                }
                if removed > added {
                    builder.push_warning(format!(
                        "Test file {} has net deletion: -{} +{} lines",
                        path, removed, added
                    ));
                }
            }
            _ => {}
        }

        builder.finish()
    }

    fn analyze_source(
        &self,
        path: &str,
        lines: &[DiffLine<'_>],
        files: &dyn TextSource,
        builder: &mut FileAnalysisBuilder,
    ) {
        let project = &self.config.project;
        let added = diff::added_text(lines);

        // Pattern rules that inspect the whole file stay quiet when it
        // cannot be read; a deleted file is not an error.
        let full_text = if files.exists(path) {
            match files.read_text(path) {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(path, error = %e, "file unreadable");
                    builder.record_unverified(format!("file unreadable ({})", e));
                    None
                }
            }
        } else {
            None
        };

        for finding in patterns::scan(path, &added, full_text.as_deref()) {
            builder.push_finding(finding);
        }

        if !classify::is_reviewable_source(project, path) {
            return;
        }
        let Some(test_path) = classify::expected_test_path(project, path) else {
            return;
        };

        let has_test = files.exists(&test_path);
        builder.expected_test(test_path.clone(), has_test);

        let extracted = symbols::extract(lines);

        if !has_test {
            // Missing companion test short-circuits symbol evaluation.
            builder.push_issue(format!("Missing test file: expected {}", test_path));
            builder.symbols(extracted);
            return;
        }

        if extracted.is_empty() {
            return;
        }

        match files.read_text(&test_path) {
            Ok(test_text) => {
                let gaps = coverage::evaluate(&extracted, &test_text);
                builder.symbols(extracted);
                builder.record_gaps(gaps, &test_path);
            }
            Err(e) => {
                tracing::warn!(path = %test_path, error = %e, "test file unreadable");
                builder.symbols(extracted);
                builder.record_unverified(format!("test file unreadable ({})", e));
            }
        }
    }
}

fn count_lines(lines: &[DiffLine<'_>]) -> (u64, u64) {
    let mut added = 0;
    let mut removed = 0;
    for line in lines {
        match line.origin {
            LineOrigin::Added => added += 1,
            LineOrigin::Removed => removed += 1,
            LineOrigin::Context => {}
        }
    }
    (added, removed)
}

/// Test definitions removed by the diff and not re-added elsewhere in it,
/// as `Suite.Name` strings.
fn deleted_tests(lines: &[DiffLine<'_>]) -> Vec<String> {
    let removed: Vec<String> = lines
        .iter()
        .filter(|l| l.origin == LineOrigin::Removed)
        .filter_map(|l| test_signature(l.text))
        .collect();
    if removed.is_empty() {
        return Vec::new();
    }

    let added: Vec<String> = lines
        .iter()
        .filter(|l| l.origin == LineOrigin::Added)
        .filter_map(|l| test_signature(l.text))
        .collect();

    removed
        .into_iter()
        .filter(|name| !added.contains(name))
        .collect()
}

/// Parse `TEST(Suite, Name)` or `TEST_F(Suite, Name)` into `Suite.Name`.
fn test_signature(text: &str) -> Option<String> {
    let trimmed = text.trim_start();
    let rest = trimmed
        .strip_prefix("TEST_F(")
        .or_else(|| trimmed.strip_prefix("TEST_P("))
        .or_else(|| trimmed.strip_prefix("TEST("))?;
    let args = rest.split(')').next()?;
    let (suite, name) = args.split_once(',')?;
    Some(format!("{}.{}", suite.trim(), name.trim()))
}
