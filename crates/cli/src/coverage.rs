// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Heuristic coverage evaluation for extracted symbols.
//!
//! Given the full text of a companion test file, each symbol is judged
//! covered or not by name matching alone. Enum cases demand a plain
//! substring hit; callables accept the looser "test ... name" shape in
//! either order. The policy is asymmetric on purpose: a missed enum case
//! is a hard finding, a missed callable only a weak one.

use memchr::memmem;
use serde::Serialize;

use crate::symbols::{SymbolKind, SymbolRecord};

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;

/// A symbol the test text does not appear to exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub symbol: SymbolRecord,
    /// Human-readable explanation, without file context.
    pub reason: String,
}

/// Evaluate all symbols against the companion test text.
///
/// Gaps come back in symbol order. Destructors and bare `get`/`set`
/// accessors are never reported.
pub fn evaluate(symbols: &[SymbolRecord], test_text: &str) -> Vec<CoverageGap> {
    let lowered = test_text.to_lowercase();
    let mut gaps = Vec::new();

    for symbol in symbols {
        if is_excluded(symbol) {
            continue;
        }
        match symbol.kind {
            SymbolKind::EnumCase => {
                if !enum_case_covered(&symbol.name, test_text) {
                    gaps.push(CoverageGap {
                        symbol: symbol.clone(),
                        reason: format!("enum case {} is not referenced by the tests", symbol.name),
                    });
                }
            }
            SymbolKind::Callable => {
                if !callable_covered(symbol.simple_name(), &lowered) {
                    gaps.push(CoverageGap {
                        symbol: symbol.clone(),
                        reason: format!(
                            "{} does not appear near a test in the test file",
                            symbol.name
                        ),
                    });
                }
            }
        }
    }

    gaps
}

/// Symbols the heuristic refuses to judge: destructors and the accessor
/// names that C++ macros stamp out.
fn is_excluded(symbol: &SymbolRecord) -> bool {
    let simple = symbol.simple_name();
    simple.starts_with('~') || simple == "get" || simple == "set"
}

/// Enum case coverage: exact substring of the test text.
pub fn enum_case_covered(value: &str, test_text: &str) -> bool {
    memmem::find(test_text.as_bytes(), value.as_bytes()).is_some()
}

/// Callable coverage: the name and the word "test" both occur, in either
/// order, with anything between. Expects a pre-lowercased haystack.
pub fn callable_covered(simple_name: &str, lowered_test_text: &str) -> bool {
    let name = simple_name.to_lowercase();

    let Some(first_test) = lowered_test_text.find("test") else {
        return false;
    };
    let Some(first_name) = lowered_test_text.find(&name) else {
        return false;
    };
    // rfind cannot fail once find succeeded.
    let last_test = lowered_test_text.rfind("test").unwrap_or(first_test);
    let last_name = lowered_test_text.rfind(&name).unwrap_or(first_name);

    first_test + "test".len() <= last_name || first_name + name.len() <= last_test
}
