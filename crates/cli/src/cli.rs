// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cache::{DEFAULT_CLEAN_DAYS, DEFAULT_MAX_AGE_DAYS};

/// Pre-review analysis for C++ changesets: coverage gaps and risky
/// patterns straight from the diff
#[derive(Parser)]
#[command(name = "revet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "REVET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the repository (default: current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze the change set against the base branch
    Review(ReviewArgs),
    /// Manage cached coverage snapshots
    Coverage(CoverageArgs),
    /// Initialize revet configuration
    Init(InitArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(clap::Args)]
pub struct ReviewArgs {
    /// Base ref for comparison (default: detected main/master)
    #[arg(long, value_name = "REF")]
    pub base: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Maximum findings to display per section (default: 15)
    #[arg(long, default_value_t = 15, value_name = "N")]
    pub limit: usize,

    /// Show all findings (no limit)
    #[arg(long)]
    pub no_limit: bool,
}

#[derive(clap::Args)]
pub struct CoverageArgs {
    #[command(subcommand)]
    pub action: CoverageAction,
}

#[derive(Subcommand)]
pub enum CoverageAction {
    /// Save the current coverage report for a branch
    Save {
        /// Branch to save under (default: current branch)
        #[arg(long)]
        branch: Option<String>,

        /// Coverage report to parse
        #[arg(long, value_name = "FILE", default_value = "generated/coverage/coverage.txt")]
        file: PathBuf,
    },
    /// Check whether a branch's snapshot is stale (exit 1 if so)
    Stale {
        /// Branch to check (default: current branch)
        #[arg(long)]
        branch: Option<String>,

        /// Maximum snapshot age in days
        #[arg(long, default_value_t = DEFAULT_MAX_AGE_DAYS, value_name = "DAYS")]
        max_age: i64,
    },
    /// Compare current coverage with a cached base (exit 1 on regression)
    Compare {
        /// Base branch to compare against
        #[arg(long, value_name = "BRANCH")]
        with: String,

        /// Coverage report to parse
        #[arg(long, value_name = "FILE", default_value = "generated/coverage/coverage.txt")]
        file: PathBuf,
    },
    /// Show the cached summary for a branch
    Summary {
        /// Branch to show (default: current branch)
        #[arg(long)]
        branch: Option<String>,
    },
    /// Remove snapshots older than a cutoff
    Clean {
        /// Age threshold in days
        #[arg(long, default_value_t = DEFAULT_CLEAN_DAYS, value_name = "DAYS")]
        older_than: i64,
    },
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
