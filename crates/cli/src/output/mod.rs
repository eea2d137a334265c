// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for review reports.

pub mod json;
pub mod markdown;
pub mod text;

use termcolor::ColorChoice;

/// Output formatting options.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum findings to show across the report sections (None =
    /// unlimited).
    pub limit: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { limit: Some(15) }
    }
}

impl FormatOptions {
    pub fn no_limit() -> Self {
        Self { limit: None }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

/// Resolve the color choice from CLI flags and the environment.
///
/// `--color` and `--no-color` win over everything; otherwise `NO_COLOR`
/// disables and a non-tty stdout falls back to plain output.
pub fn resolve_color(force_color: bool, no_color: bool) -> ColorChoice {
    if no_color {
        return ColorChoice::Never;
    }
    if force_color {
        return ColorChoice::Always;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
