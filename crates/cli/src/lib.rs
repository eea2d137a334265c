// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod analyze;
pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod coverage;
pub mod diff;
pub mod error;
pub mod git;
pub mod init;
pub mod output;
pub mod patterns;
pub mod reader;
pub mod report;
pub mod symbols;

pub use analyze::{Analyzer, ChangeSource, FileAnalysis, TextSource, Verification};
pub use cli::{Cli, Command, CoverageArgs, InitArgs, OutputFormat, ReviewArgs};
pub use config::{Config, ProjectConfig};
pub use error::{Error, ExitCode, Result};
pub use report::ReviewReport;
