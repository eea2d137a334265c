// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Symbol extraction from added diff lines.
//!
//! Two line-shape matchers drive extraction: callable definitions
//! (functions, methods, constructors) and scoped enum-case labels inside
//! switch statements. Both are heuristics over single lines of C++; false
//! positives are tolerated because downstream coverage findings are
//! advisory, never blocking on their own.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::diff::{DiffLine, LineOrigin};

#[cfg(test)]
#[path = "symbols_tests.rs"]
mod tests;

/// What kind of construct a symbol was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Function, method, or constructor definition.
    Callable,
    /// `case Scope::VALUE:` label.
    EnumCase,
}

/// A symbol found on an added line, positioned in the resulting file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolRecord {
    /// Full name as matched (`Filter::onData`, `HIGH`).
    pub name: String,
    pub kind: SymbolKind,
    /// 1-based line in the resulting file.
    pub line: u32,
    /// Scope portion for qualified callables (`Filter` in `Filter::onData`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

impl SymbolRecord {
    /// Name without its scope qualifier.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

// Scoped enumerator label: one or more scope segments, then the value.
#[allow(clippy::unwrap_used)] // constant pattern
static ENUM_CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"case\s+(?:[A-Za-z_]\w*::)+([A-Za-z_]\w*)\s*:").unwrap()
});

// Callable shape: optionally qualified name (destructor marker allowed on
// the final segment) directly followed by an argument list. The leading
// character class keeps `obj.method(` and `ptr->method(` from matching.
#[allow(clippy::unwrap_used)] // constant pattern
static CALLABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w.>])((?:[A-Za-z_]\w*::)*~?[A-Za-z_]\w*)\s*\(").unwrap()
});

/// C++ keywords that introduce parenthesized constructs but never name a
/// callable definition.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "switch", "case", "return", "do", "new", "delete", "sizeof",
    "throw", "catch", "goto", "using", "namespace", "template", "typedef", "static_assert",
];

/// Match a scoped enum-case label, returning the bare enumerator value.
pub fn match_enum_case(line: &str) -> Option<&str> {
    ENUM_CASE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Match a callable definition shape, returning the qualified name.
///
/// This checks the line shape and keyword guards only; the body-delimiter
/// requirement is applied by [`extract`], which can see the next line.
pub fn match_callable(line: &str) -> Option<&str> {
    let caps = CALLABLE.captures(line)?;
    let name = caps.get(1)?.as_str();

    let simple = name.rsplit("::").next().unwrap_or(name);
    if CONTROL_KEYWORDS.contains(&simple) {
        return None;
    }
    if let Some(token) = leading_token(line)
        && CONTROL_KEYWORDS.contains(&token)
    {
        return None;
    }

    Some(name)
}

/// First identifier at the start of the trimmed line, if any.
fn leading_token(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    if end == 0 { None } else { Some(&trimmed[..end]) }
}

/// Extract symbols from the added lines of a parsed diff.
///
/// A callable match only becomes a symbol when its line, or the next line
/// present in the resulting file, contains an opening body delimiter. A
/// trailing `;` marks a declaration and disqualifies the continuation
/// check. Enum-case labels need no body and win when a line matches both
/// shapes.
pub fn extract(lines: &[DiffLine<'_>]) -> Vec<SymbolRecord> {
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if line.origin != LineOrigin::Added {
            continue;
        }
        let Some(n) = line.new_line else {
            continue;
        };

        if let Some(value) = match_enum_case(line.text) {
            out.push(SymbolRecord {
                name: value.to_string(),
                kind: SymbolKind::EnumCase,
                line: n,
                qualifier: None,
            });
            continue;
        }

        if let Some(name) = match_callable(line.text) {
            if !has_body_delimiter(line.text, lines.get(i + 1..).unwrap_or(&[])) {
                continue;
            }
            let qualifier = name.rsplit_once("::").map(|(q, _)| q.to_string());
            out.push(SymbolRecord {
                name: name.to_string(),
                kind: SymbolKind::Callable,
                line: n,
                qualifier,
            });
        }
    }

    out
}

/// True when the signature line or its immediate continuation in the
/// resulting file opens a body.
fn has_body_delimiter(text: &str, rest: &[DiffLine<'_>]) -> bool {
    if text.contains('{') {
        return true;
    }
    if text.trim_end().ends_with(';') {
        return false;
    }
    // Removed lines do not exist in the result; skip to the next line that
    // does.
    rest.iter()
        .find(|l| l.origin != LineOrigin::Removed)
        .is_some_and(|l| l.text.contains('{'))
}
