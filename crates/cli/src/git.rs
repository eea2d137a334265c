// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git-backed change source.
//!
//! Uses git2 (libgit2) for all git operations, no subprocesses. The
//! change set is everything different from the merge base with the base
//! branch: committed changes on the branch, staged changes, and unstaged
//! working-tree changes. Paths come back sorted so downstream processing
//! and report ordering are deterministic.
//!
//! Repository discovery and base resolution failures are fatal; a diff
//! failing for one file is recoverable and handled by the caller.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use git2::Repository;

use crate::analyze::ChangeSource;
use crate::error::{Error, Result};

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;

/// Extract the repo-relative path from a diff delta.
///
/// For deleted files `new_file().path()` is `None`, so fall back to
/// `old_file()`.
fn extract_path<'a>(delta: &'a git2::DiffDelta<'a>) -> Option<&'a Path> {
    delta.new_file().path().or_else(|| delta.old_file().path())
}

/// Check if a path is inside a git repository.
pub fn is_git_repo(root: &Path) -> bool {
    Repository::discover(root).is_ok()
}

/// Resolve the working-tree root of the repository containing `path`.
pub fn discover_root(path: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(path).map_err(|_| Error::NotARepository {
        path: path.to_path_buf(),
    })?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Git {
            message: "repository has no working tree".to_string(),
        })
}

/// Detect the base branch (main or master, local then origin/).
pub fn detect_base_branch(repo: &Repository) -> Option<String> {
    for name in ["main", "master"] {
        if repo.find_branch(name, git2::BranchType::Local).is_ok() {
            return Some(name.to_string());
        }
    }
    for name in ["origin/main", "origin/master"] {
        if repo.revparse_single(name).is_ok() {
            return Some(name.to_string());
        }
    }
    None
}

/// Name of the branch HEAD points at, if it points at one.
pub fn current_branch(root: &Path) -> Result<Option<String>> {
    let repo = Repository::discover(root).map_err(|_| Error::NotARepository {
        path: root.to_path_buf(),
    })?;
    let head = repo.head()?;
    if head.is_branch() {
        Ok(head.shorthand().map(String::from))
    } else {
        Ok(None)
    }
}

/// Full commit SHA a branch (or any revspec) resolves to.
pub fn branch_commit(root: &Path, branch: &str) -> Result<String> {
    let repo = Repository::discover(root).map_err(|_| Error::NotARepository {
        path: root.to_path_buf(),
    })?;
    let object = repo.revparse_single(branch)?;
    Ok(object.peel_to_commit()?.id().to_string())
}

/// Commit time of the branch tip.
pub fn branch_commit_time(root: &Path, branch: &str) -> Result<DateTime<Utc>> {
    let repo = Repository::discover(root).map_err(|_| Error::NotARepository {
        path: root.to_path_buf(),
    })?;
    let commit = repo.revparse_single(branch)?.peel_to_commit()?;
    DateTime::from_timestamp(commit.time().seconds(), 0).ok_or_else(|| Error::Git {
        message: format!("commit time out of range for {}", branch),
    })
}

/// Diff options that treat untracked files as additions.
fn untracked_opts() -> git2::DiffOptions {
    let mut opts = git2::DiffOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .show_untracked_content(true);
    opts
}

/// Change source over a git working tree.
pub struct GitChanges {
    repo: Repository,
    /// Tree of the merge base between the base ref and HEAD. All diffs
    /// are computed against this tree so the change set reflects the
    /// branch's own work, not drift on the base.
    base_tree_oid: git2::Oid,
}

impl GitChanges {
    /// Open the repository containing `root` and resolve the base ref.
    ///
    /// With no explicit base, main/master are tried in order; finding
    /// neither is an argument error since the comparison point would be
    /// arbitrary.
    pub fn open(root: &Path, base: Option<&str>) -> Result<Self> {
        let repo = Repository::discover(root).map_err(|_| Error::NotARepository {
            path: root.to_path_buf(),
        })?;

        let base_name = match base {
            Some(name) => name.to_string(),
            None => detect_base_branch(&repo).ok_or_else(|| {
                Error::Argument(
                    "could not detect a base branch (tried main, master); pass --base".to_string(),
                )
            })?,
        };

        let base_oid = repo
            .revparse_single(&base_name)
            .map_err(|e| Error::Git {
                message: format!("failed to resolve base ref {}: {}", base_name, e.message()),
            })?
            .peel_to_commit()?
            .id();
        let head_oid = repo
            .head()?
            .target()
            .ok_or_else(|| Error::Git {
                message: "HEAD has no target".to_string(),
            })?;

        let merge_base = repo.merge_base(base_oid, head_oid)?;
        let base_tree_oid = repo.find_commit(merge_base)?.tree_id();

        Ok(Self {
            repo,
            base_tree_oid,
        })
    }
}

impl ChangeSource for GitChanges {
    /// Changed paths, repo-relative, sorted.
    ///
    /// Combines committed (merge-base..HEAD), staged, and unstaged
    /// changes.
    fn changed_files(&self) -> Result<Vec<String>> {
        let base_tree = self.repo.find_tree(self.base_tree_oid)?;
        let head_tree = self.repo.head()?.peel_to_tree()?;
        let index = self.repo.index()?;

        let mut paths = BTreeSet::new();
        let mut collect = |diff: git2::Diff<'_>| {
            for delta in diff.deltas() {
                if let Some(path) = extract_path(&delta) {
                    paths.insert(path.to_string_lossy().into_owned());
                }
            }
        };

        collect(
            self.repo
                .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), None)?,
        );
        collect(
            self.repo
                .diff_tree_to_index(Some(&base_tree), Some(&index), None)?,
        );
        // Untracked files are part of the change set; a new file the
        // author forgot to `git add` still needs a test.
        let mut opts = untracked_opts();
        collect(
            self.repo
                .diff_index_to_workdir(Some(&index), Some(&mut opts))?,
        );

        Ok(paths.into_iter().collect())
    }

    /// Unified diff text for one path, merge base against the working
    /// tree (staged and unstaged edits included).
    fn diff_text(&self, path: &str) -> Result<String> {
        let base_tree = self.repo.find_tree(self.base_tree_oid)?;
        let mut opts = untracked_opts();
        opts.pathspec(path);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&base_tree), Some(&mut opts))?;

        let mut text = String::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            // Content lines carry their origin as a separate field; the
            // cursor expects the one-character prefix back in place.
            match line.origin() {
                '+' | '-' | ' ' => text.push(line.origin()),
                _ => {}
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        Ok(text)
    }
}
