// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Size-gated filesystem reads, rooted at the repository.
//!
//! Companion test files and changed sources are assumed small; anything
//! over the limit is rejected rather than read, which surfaces downstream
//! as a recoverable "could not verify" warning.

use std::path::{Path, PathBuf};

use crate::analyze::TextSource;
use crate::error::{Error, Result};

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;

/// Maximum file size to read (10MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Size at which to log large files (1MB).
const LARGE_FILE_WARN: u64 = 1024 * 1024;

/// Reads repo-relative paths from disk, refusing oversized files.
pub struct FileReader {
    root: PathBuf,
    max_size: u64,
}

impl FileReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_size: MAX_FILE_SIZE,
        }
    }

    /// Override the size gate, for tests.
    pub fn with_max_size(root: impl Into<PathBuf>, max_size: u64) -> Self {
        Self {
            root: root.into(),
            max_size,
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn read_gated(&self, path: &Path) -> Result<String> {
        let metadata = std::fs::metadata(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let size = metadata.len();
        if size > self.max_size {
            return Err(Error::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max_size: self.max_size,
            });
        }

        if size > LARGE_FILE_WARN {
            tracing::info!(
                path = %path.display(),
                size_mb = size as f64 / 1_000_000.0,
                "reading large file"
            );
        }

        std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl TextSource for FileReader {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn read_text(&self, path: &str) -> Result<String> {
        self.read_gated(&self.resolve(path))
    }
}
