// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage snapshot cache.
//!
//! Persists one JSON file per branch under `.revet/coverage-cache/`,
//! holding the parsed coverage summary plus the commit it was measured
//! at. Snapshots are human-inspectable on purpose; this is a small
//! key-value store, not part of the analysis engine.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;

/// Cache directory, relative to the repository root.
pub const CACHE_DIR: &str = ".revet/coverage-cache";

/// Default staleness window in days.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 7;

/// Default age threshold for `clean`, in days.
pub const DEFAULT_CLEAN_DAYS: i64 = 30;

/// Coverage drop beyond which a comparison counts as a regression.
pub const REGRESSION_THRESHOLD: f64 = 0.1;

/// Parsed totals from a coverage report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub lines_total: u64,
    pub lines_covered: u64,
    pub coverage_percent: f64,
}

/// One cached coverage measurement for a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageSnapshot {
    pub branch: String,
    pub commit_sha: String,
    /// When the snapshot was saved.
    pub timestamp: DateTime<Utc>,
    /// When the branch tip was committed, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_last_commit: Option<DateTime<Utc>>,
    pub summary: CoverageSummary,
}

/// Parse the summary out of a coverage.txt report.
///
/// The primary shape is the llvm-cov totals line
/// (`TOTAL  150000  148500  99.00%`); any line mentioning "total" with
/// enough columns is accepted. When no totals line parses, the first
/// percentage anywhere in the text is taken with zeroed line counts.
pub fn parse_coverage_summary(text: &str) -> Option<CoverageSummary> {
    for line in text.lines() {
        if !line.to_lowercase().contains("total") {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }
        let (Ok(total), Ok(covered)) = (parts[1].parse(), parts[2].parse()) else {
            continue;
        };
        let Ok(percent) = parts[3].trim_end_matches('%').parse() else {
            continue;
        };
        return Some(CoverageSummary {
            lines_total: total,
            lines_covered: covered,
            coverage_percent: percent,
        });
    }

    first_percentage(text).map(|percent| CoverageSummary {
        lines_total: 0,
        lines_covered: 0,
        coverage_percent: percent,
    })
}

/// First `<number>%` in the text. Stray `%` signs with no parseable
/// number before them are skipped.
fn first_percentage(text: &str) -> Option<f64> {
    let mut rest = text;
    while let Some(idx) = rest.find('%') {
        let head = &rest[..idx];
        let start = head
            .rfind(|c: char| !(c.is_ascii_digit() || c == '.'))
            .map(|i| i + 1)
            .unwrap_or(0);
        if let Ok(percent) = head[start..].parse() {
            return Some(percent);
        }
        rest = &rest[idx + 1..];
    }
    None
}

/// Whether a snapshot still reflects its branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Stale(String),
}

impl Staleness {
    pub fn is_stale(&self) -> bool {
        matches!(self, Staleness::Stale(_))
    }
}

/// Judge a snapshot against the branch's current commit and the clock.
pub fn staleness(
    snapshot: &CoverageSnapshot,
    current_sha: &str,
    max_age_days: i64,
    now: DateTime<Utc>,
) -> Staleness {
    if snapshot.commit_sha != current_sha {
        return Staleness::Stale(format!(
            "branch '{}' has new commits ({} -> {})",
            snapshot.branch,
            short(&snapshot.commit_sha),
            short(current_sha)
        ));
    }

    let age = now.signed_duration_since(snapshot.timestamp);
    if age.num_days() > max_age_days {
        return Staleness::Stale(format!(
            "snapshot is {} days old (max {})",
            age.num_days(),
            max_age_days
        ));
    }

    Staleness::Fresh
}

fn short(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

/// Qualitative read on a coverage delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    SignificantRegression,
    MinorRegression,
    NoChange,
    MinorImprovement,
    SignificantImprovement,
}

impl Assessment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::SignificantRegression => "significant regression",
            Assessment::MinorRegression => "minor regression",
            Assessment::NoChange => "no change",
            Assessment::MinorImprovement => "minor improvement",
            Assessment::SignificantImprovement => "significant improvement",
        }
    }

    fn for_diff(diff_percent: f64) -> Self {
        if diff_percent < -0.5 {
            Assessment::SignificantRegression
        } else if diff_percent < -REGRESSION_THRESHOLD {
            Assessment::MinorRegression
        } else if diff_percent < REGRESSION_THRESHOLD {
            Assessment::NoChange
        } else if diff_percent < 0.5 {
            Assessment::MinorImprovement
        } else {
            Assessment::SignificantImprovement
        }
    }
}

impl std::fmt::Display for Assessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current coverage against a cached base snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub base_branch: String,
    pub base_commit: String,
    pub base_coverage: f64,
    pub current_coverage: f64,
    pub diff_percent: f64,
    pub diff_lines: i64,
    pub regression: bool,
    pub assessment: Assessment,
}

/// Compare current coverage with a cached base.
///
/// A drop larger than [`REGRESSION_THRESHOLD`] is a regression; smaller
/// movements in either direction count as noise.
pub fn compare(base: &CoverageSnapshot, current: &CoverageSummary) -> Comparison {
    let diff_percent = current.coverage_percent - base.summary.coverage_percent;
    let diff_lines = current.lines_covered as i64 - base.summary.lines_covered as i64;

    Comparison {
        base_branch: base.branch.clone(),
        base_commit: short(&base.commit_sha).to_string(),
        base_coverage: base.summary.coverage_percent,
        current_coverage: current.coverage_percent,
        diff_percent,
        diff_lines,
        regression: diff_percent < -REGRESSION_THRESHOLD,
        assessment: Assessment::for_diff(diff_percent),
    }
}

/// On-disk snapshot store under the repository root.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: &Path) -> Self {
        Self {
            dir: root.join(CACHE_DIR),
        }
    }

    /// Cache file for a branch. Slashes in branch names (origin/main)
    /// are flattened so every snapshot lives directly in the cache dir.
    fn path_for(&self, branch: &str) -> PathBuf {
        self.dir.join(format!("{}.json", branch.replace('/', "_")))
    }

    /// Write a snapshot, creating the cache directory if needed.
    pub fn save(&self, snapshot: &CoverageSnapshot) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.path_for(&snapshot.branch);
        let json = serde_json::to_string_pretty(snapshot).map_err(|e| Error::Cache {
            message: format!("failed to serialize snapshot: {}", e),
        })?;
        std::fs::write(&path, json).map_err(|e| Error::Io {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }

    /// Load the snapshot for a branch, `None` if never saved.
    pub fn load(&self, branch: &str) -> Result<Option<CoverageSnapshot>> {
        let path = self.path_for(branch);
        if !path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(&path).map_err(|e| Error::Io {
            path: path.clone(),
            source: e,
        })?;
        let snapshot = serde_json::from_str(&text).map_err(|e| Error::Cache {
            message: format!("corrupt snapshot {}: {}", path.display(), e),
        })?;

        Ok(Some(snapshot))
    }

    /// Delete snapshots older than the cutoff. Returns the file names
    /// removed. Unreadable or corrupt snapshots are left in place.
    pub fn clean(&self, older_than_days: i64, now: DateTime<Utc>) -> Result<Vec<String>> {
        let cutoff = now - Duration::days(older_than_days);
        let mut removed = Vec::new();

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // No cache dir means nothing to clean.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(removed),
            Err(e) => {
                return Err(Error::Io {
                    path: self.dir.clone(),
                    source: e,
                });
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let snapshot: CoverageSnapshot = match std::fs::read_to_string(&path)
                .ok()
                .and_then(|text| serde_json::from_str(&text).ok())
            {
                Some(snapshot) => snapshot,
                None => {
                    tracing::warn!(path = %path.display(), "skipping unreadable snapshot");
                    continue;
                }
            };

            if snapshot.timestamp < cutoff {
                std::fs::remove_file(&path).map_err(|e| Error::Io {
                    path: path.clone(),
                    source: e,
                })?;
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    removed.push(name.to_string());
                }
            }
        }

        Ok(removed)
    }
}
