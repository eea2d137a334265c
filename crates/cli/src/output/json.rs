// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! The report serializes as-is; the JSON shape is the [`ReviewReport`]
//! structure, buffered and written whole.

use std::io::Write;

use crate::report::ReviewReport;

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

/// Write the report as pretty-printed JSON with a trailing newline.
pub fn write_report<W: Write>(mut out: W, report: &ReviewReport) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)
}
