// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage snapshot command implementation.
//!
//! Exit codes follow the check semantics: 0 for fresh/no-regression,
//! 1 for stale/regressed, and the usual 2/3 for argument and internal
//! errors.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;

use revet::cache::{
    self, CoverageSnapshot, CoverageSummary, DEFAULT_MAX_AGE_DAYS, SnapshotStore, Staleness,
};
use revet::cli::{Cli, CoverageAction, CoverageArgs};
use revet::error::{Error, ExitCode};
use revet::git;

/// Run a coverage subcommand.
pub fn run(cli: &Cli, args: &CoverageArgs) -> anyhow::Result<ExitCode> {
    let start = super::start_dir(cli)?;
    let root = git::discover_root(&start)?;
    let store = SnapshotStore::new(&root);

    match &args.action {
        CoverageAction::Save { branch, file } => save(&root, &store, branch.as_deref(), file),
        CoverageAction::Stale { branch, max_age } => {
            stale(&root, &store, branch.as_deref(), *max_age)
        }
        CoverageAction::Compare { with, file } => compare(&root, &store, with, file),
        CoverageAction::Summary { branch } => summary(&root, &store, branch.as_deref()),
        CoverageAction::Clean { older_than } => clean(&store, *older_than),
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

/// Branch to operate on: explicit flag, else the checked-out branch.
fn resolve_branch(root: &Path, branch: Option<&str>) -> Result<String, Error> {
    match branch {
        Some(name) => Ok(name.to_string()),
        None => git::current_branch(root)?.ok_or_else(|| {
            Error::Argument("HEAD is not on a branch; pass --branch".to_string())
        }),
    }
}

/// Read and parse the coverage report file.
fn read_summary(root: &Path, file: &PathBuf) -> anyhow::Result<CoverageSummary> {
    let path = if file.is_absolute() {
        file.clone()
    } else {
        root.join(file)
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("coverage report not found at {}", path.display()))?;

    cache::parse_coverage_summary(&text)
        .ok_or_else(|| {
            Error::Cache {
                message: format!("could not parse a coverage summary from {}", path.display()),
            }
            .into()
        })
}

fn save(
    root: &Path,
    store: &SnapshotStore,
    branch: Option<&str>,
    file: &PathBuf,
) -> anyhow::Result<ExitCode> {
    let branch = resolve_branch(root, branch)?;
    let summary = read_summary(root, file)?;
    let commit_sha = git::branch_commit(root, &branch)?;

    let snapshot = CoverageSnapshot {
        branch: branch.clone(),
        commit_sha: commit_sha.clone(),
        timestamp: Utc::now(),
        branch_last_commit: git::branch_commit_time(root, &branch).ok(),
        summary,
    };
    let path = store.save(&snapshot)?;

    println!("Saved coverage for '{}'", branch);
    println!("  Commit: {}", short_sha(&commit_sha));
    println!(
        "  Coverage: {:.2}%",
        snapshot.summary.coverage_percent
    );
    println!("  Snapshot: {}", path.display());

    Ok(ExitCode::Success)
}

fn stale(
    root: &Path,
    store: &SnapshotStore,
    branch: Option<&str>,
    max_age: i64,
) -> anyhow::Result<ExitCode> {
    let branch = resolve_branch(root, branch)?;

    let Some(snapshot) = store.load(&branch)? else {
        println!("Stale: no snapshot for branch '{}'", branch);
        return Ok(ExitCode::ReviewFailed);
    };

    let current_sha = git::branch_commit(root, &branch)?;
    match cache::staleness(&snapshot, &current_sha, max_age, Utc::now()) {
        Staleness::Fresh => {
            println!("Fresh: snapshot matches '{}'", branch);
            println!(
                "  Coverage: {:.2}%",
                snapshot.summary.coverage_percent
            );
            println!("  Commit: {}", short_sha(&snapshot.commit_sha));
            println!("  Saved: {}", snapshot.timestamp.to_rfc3339());
            Ok(ExitCode::Success)
        }
        Staleness::Stale(reason) => {
            println!("Stale: {}", reason);
            Ok(ExitCode::ReviewFailed)
        }
    }
}

fn compare(
    root: &Path,
    store: &SnapshotStore,
    with: &str,
    file: &PathBuf,
) -> anyhow::Result<ExitCode> {
    let Some(base) = store.load(with)? else {
        return Err(Error::Cache {
            message: format!(
                "no snapshot for base branch '{}'; run `revet coverage save --branch {}` first",
                with, with
            ),
        }
        .into());
    };

    let current = read_summary(root, file)?;
    let comparison = cache::compare(&base, &current);

    println!("Coverage comparison:");
    println!(
        "  Base ({}): {:.2}% @ {}",
        comparison.base_branch, comparison.base_coverage, comparison.base_commit
    );
    println!("  Current: {:.2}%", comparison.current_coverage);
    println!("  Difference: {:+.2}%", comparison.diff_percent);
    println!("  Assessment: {}", comparison.assessment);

    let base_sha = git::branch_commit(root, with)?;
    if let Staleness::Stale(reason) =
        cache::staleness(&base, &base_sha, DEFAULT_MAX_AGE_DAYS, Utc::now())
    {
        println!();
        println!("Warning: base snapshot is stale ({})", reason);
        println!("  Consider re-running: revet coverage save --branch {}", with);
    }

    Ok(if comparison.regression {
        ExitCode::ReviewFailed
    } else {
        ExitCode::Success
    })
}

fn summary(
    root: &Path,
    store: &SnapshotStore,
    branch: Option<&str>,
) -> anyhow::Result<ExitCode> {
    let branch = resolve_branch(root, branch)?;

    let Some(snapshot) = store.load(&branch)? else {
        println!("No snapshot for branch '{}'", branch);
        return Ok(ExitCode::ReviewFailed);
    };

    println!("Coverage summary for '{}':", branch);
    println!(
        "  Coverage: {:.2}%",
        snapshot.summary.coverage_percent
    );
    if snapshot.summary.lines_total > 0 {
        println!(
            "  Lines: {} / {}",
            snapshot.summary.lines_covered, snapshot.summary.lines_total
        );
    }
    println!("  Commit: {}", short_sha(&snapshot.commit_sha));
    println!("  Saved: {}", snapshot.timestamp.to_rfc3339());

    let current_sha = git::branch_commit(root, &branch)?;
    match cache::staleness(&snapshot, &current_sha, DEFAULT_MAX_AGE_DAYS, Utc::now()) {
        Staleness::Fresh => println!("  Status: fresh"),
        Staleness::Stale(reason) => println!("  Status: stale ({})", reason),
    }

    Ok(ExitCode::Success)
}

fn clean(store: &SnapshotStore, older_than: i64) -> anyhow::Result<ExitCode> {
    let removed = store.clean(older_than, Utc::now())?;
    for name in &removed {
        println!("Removed: {}", name);
    }
    println!(
        "Cleaned {} snapshot{}",
        removed.len(),
        if removed.len() == 1 { "" } else { "s" }
    );
    Ok(ExitCode::Success)
}
