// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! Sections are printed in severity order and only when non-empty. The
//! finding limit counts across all three text sections; missing tests
//! and the summary are always shown in full.

use std::io::Write;

use termcolor::{Color, ColorSpec, WriteColor};

use super::FormatOptions;
use crate::report::ReviewReport;

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;

fn bold() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_bold(true);
    spec
}

fn colored(color: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color));
    spec
}

/// Text report writer over any color-capable stream.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    options: FormatOptions,
    shown: usize,
    truncated: bool,
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W, options: FormatOptions) -> Self {
        Self {
            out,
            options,
            shown: 0,
            truncated: false,
        }
    }

    /// Write the whole report.
    pub fn write_report(&mut self, report: &ReviewReport) -> std::io::Result<()> {
        self.write_verdict(report)?;
        self.write_summary(report)?;

        self.write_section("Issues", Color::Red, &report.issues)?;
        self.write_section("Warnings", Color::Yellow, &report.warnings)?;
        self.write_section("Suggestions", Color::Cyan, &report.suggestions)?;

        if !report.missing_tests.is_empty() {
            writeln!(self.out)?;
            self.out.set_color(&bold())?;
            writeln!(self.out, "Missing tests:")?;
            self.out.reset()?;
            for missing in &report.missing_tests {
                writeln!(
                    self.out,
                    "  {} -> {}",
                    missing.source, missing.expected_test
                )?;
            }
        }

        if self.truncated
            && let Some(limit) = self.options.limit
        {
            writeln!(self.out)?;
            writeln!(
                self.out,
                "Stopped after {} findings. Use --no-limit to see all.",
                limit
            )?;
        }

        Ok(())
    }

    fn write_verdict(&mut self, report: &ReviewReport) -> std::io::Result<()> {
        self.out.set_color(&bold())?;
        write!(self.out, "revet review")?;
        self.out.reset()?;
        write!(self.out, ": ")?;
        if report.passed {
            self.out.set_color(&colored(Color::Green))?;
            write!(self.out, "PASS")?;
        } else {
            self.out.set_color(&colored(Color::Red))?;
            write!(self.out, "FAIL")?;
        }
        self.out.reset()?;
        writeln!(self.out)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &ReviewReport) -> std::io::Result<()> {
        writeln!(
            self.out,
            "Files changed: {} (source {}, test {}, build {}, api {}, docs {})",
            report.files_changed,
            report.source_files.len(),
            report.test_files.len(),
            report.build_files.len(),
            report.api_files.len(),
            report.docs_files.len(),
        )?;
        writeln!(
            self.out,
            "Lines: +{} / -{}",
            report.lines_added, report.lines_removed
        )?;
        writeln!(
            self.out,
            "Release notes: {}",
            if report.release_notes_updated {
                "updated"
            } else {
                "not updated"
            }
        )?;
        Ok(())
    }

    fn write_section(
        &mut self,
        title: &str,
        color: Color,
        items: &[String],
    ) -> std::io::Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        writeln!(self.out)?;
        self.out.set_color(&colored(color))?;
        writeln!(self.out, "{}:", title)?;
        self.out.reset()?;

        for item in items {
            if let Some(limit) = self.options.limit
                && self.shown >= limit
            {
                self.truncated = true;
                return Ok(());
            }
            writeln!(self.out, "  - {}", item)?;
            self.shown += 1;
        }

        Ok(())
    }

    /// Whether the finding limit cut the output short.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}
