// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown output formatter.
//!
//! Section layout follows the report sections reviewers paste into PR
//! threads: summary, the three finding lists, missing tests, then one
//! table row per changed file.

use std::fmt::Write as _;

use crate::report::ReviewReport;

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;

/// Render the report as a markdown document.
pub fn render(report: &ReviewReport) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Code Review Analysis\n");

    let _ = writeln!(md, "## Summary\n");
    let _ = writeln!(md, "- **Files changed:** {}", report.files_changed);
    let _ = writeln!(md, "  - Source: {}", report.source_files.len());
    let _ = writeln!(md, "  - Tests: {}", report.test_files.len());
    let _ = writeln!(md, "  - Build: {}", report.build_files.len());
    let _ = writeln!(md, "  - API: {}", report.api_files.len());
    let _ = writeln!(md, "  - Docs: {}", report.docs_files.len());
    let _ = writeln!(
        md,
        "- **Lines:** +{} / -{}",
        report.lines_added, report.lines_removed
    );
    let _ = writeln!(
        md,
        "- **Release notes:** {}\n",
        if report.release_notes_updated {
            "updated"
        } else {
            "not updated"
        }
    );

    numbered_section(&mut md, "Issues", &report.issues);
    numbered_section(&mut md, "Warnings", &report.warnings);
    numbered_section(&mut md, "Suggestions", &report.suggestions);

    if !report.missing_tests.is_empty() {
        let _ = writeln!(md, "## Missing Tests\n");
        for missing in &report.missing_tests {
            let _ = writeln!(md, "- **Source:** `{}`", missing.source);
            let _ = writeln!(md, "  **Expected:** `{}`\n", missing.expected_test);
        }
    }

    let _ = writeln!(md, "## File Details\n");
    let _ = writeln!(md, "| File | Type | +/- | Test | Findings |");
    let _ = writeln!(md, "|------|------|-----|------|----------|");
    for file in &report.files {
        let test = match (&file.expected_test, file.has_test) {
            (Some(_), true) => "yes",
            (Some(_), false) => "missing",
            (None, _) => "n/a",
        };
        let findings = file.issues.len() + file.warnings.len() + file.suggestions.len();
        let findings = if findings == 0 {
            "-".to_string()
        } else {
            findings.to_string()
        };
        let _ = writeln!(
            md,
            "| `{}` | {} | +{}/-{} | {} | {} |",
            file.path, file.category, file.lines_added, file.lines_removed, test, findings
        );
    }

    md
}

fn numbered_section(md: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(md, "## {}\n", title);
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(md, "{}. {}", i + 1, item);
    }
    let _ = writeln!(md);
}
