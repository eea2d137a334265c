// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unified diff parsing with resulting-file line tracking.
//!
//! [`DiffCursor`] walks the text of a per-file unified diff and yields one
//! [`DiffLine`] per content line, carrying the 1-based line number each
//! added or context line will have in the resulting file. Hunk headers
//! re-seed the counter, so downstream consumers never do line math.

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;

/// Origin of a single diff content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrigin {
    /// Line present in both sides (leading space or bare).
    Context,
    /// Line added by the change (leading `+`).
    Added,
    /// Line removed by the change (leading `-`).
    Removed,
}

/// One content line of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine<'a> {
    /// Line text with the one-character diff prefix stripped.
    pub text: &'a str,
    pub origin: LineOrigin,
    /// 1-based line number in the resulting file. `None` for removed lines,
    /// which have no position in the result.
    pub new_line: Option<u32>,
}

impl DiffLine<'_> {
    pub fn is_added(&self) -> bool {
        self.origin == LineOrigin::Added
    }
}

/// Iterator over the content lines of a per-file unified diff.
///
/// Lines before the first hunk header are metadata and are never yielded.
/// A hunk header that fails to parse is skipped; content after it is only
/// yielded once a parseable header re-establishes the position.
pub struct DiffCursor<'a> {
    lines: std::str::Lines<'a>,
    next_new_line: u32,
    in_hunk: bool,
}

impl<'a> DiffCursor<'a> {
    pub fn new(diff_text: &'a str) -> Self {
        Self {
            lines: diff_text.lines(),
            next_new_line: 0,
            in_hunk: false,
        }
    }
}

impl<'a> Iterator for DiffCursor<'a> {
    type Item = DiffLine<'a>;

    fn next(&mut self) -> Option<DiffLine<'a>> {
        loop {
            let line = self.lines.next()?;

            // `@@ -oldStart[,oldCount] +newStart[,newCount] @@` re-seeds the
            // resulting-line counter.
            if line.starts_with("@@") {
                if let Some(start) = parse_hunk_header(line) {
                    self.next_new_line = start;
                    self.in_hunk = true;
                } else {
                    self.in_hunk = false;
                }
                continue;
            }

            // A new per-file header ends the current hunk (multi-file input).
            if line.starts_with("diff ") {
                self.in_hunk = false;
                continue;
            }

            if !self.in_hunk {
                continue;
            }

            // File metadata and "\ No newline at end of file" markers.
            if line.starts_with("+++")
                || line.starts_with("---")
                || line.starts_with("index ")
                || line.starts_with('\\')
            {
                continue;
            }

            if let Some(text) = line.strip_prefix('+') {
                let n = self.next_new_line;
                self.next_new_line += 1;
                return Some(DiffLine {
                    text,
                    origin: LineOrigin::Added,
                    new_line: Some(n),
                });
            }

            if let Some(text) = line.strip_prefix('-') {
                return Some(DiffLine {
                    text,
                    origin: LineOrigin::Removed,
                    new_line: None,
                });
            }

            // Context: leading space, or bare text from sloppy producers.
            let text = line.strip_prefix(' ').unwrap_or(line);
            let n = self.next_new_line;
            self.next_new_line += 1;
            return Some(DiffLine {
                text,
                origin: LineOrigin::Context,
                new_line: Some(n),
            });
        }
    }
}

/// Extract the resulting-file start line from a hunk header.
///
/// Accepts both `@@ -a,b +c,d @@` and the count-less `@@ -a +c @@` form.
fn parse_hunk_header(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("@@ -")?;
    let plus = rest.find(" +")?;
    let after_plus = &rest[plus + 2..];
    let end = after_plus.find(" @@")?;
    let new_range = &after_plus[..end];
    let start = new_range.split(',').next()?;
    start.parse().ok()
}

/// Count added and removed lines in a per-file diff.
pub fn count_changes(diff_text: &str) -> (u64, u64) {
    let mut added = 0;
    let mut removed = 0;
    for line in DiffCursor::new(diff_text) {
        match line.origin {
            LineOrigin::Added => added += 1,
            LineOrigin::Removed => removed += 1,
            LineOrigin::Context => {}
        }
    }
    (added, removed)
}

/// Collect the text of all added lines, newline-joined.
pub fn added_text(lines: &[DiffLine<'_>]) -> String {
    let mut out = String::new();
    for line in lines.iter().filter(|l| l.is_added()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line.text);
    }
    out
}
