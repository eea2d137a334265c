// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Revet error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not inside a git repository
    #[error("not a git repository: {}", .path.display())]
    NotARepository { path: PathBuf },

    /// Git operation failed
    #[error("git error: {message}")]
    Git { message: String },

    /// Coverage cache is missing or unreadable
    #[error("coverage cache error: {message}")]
    Cache { message: String },

    /// File exceeds maximum size limit.
    #[error("file too large: {} ({} bytes, max: {} bytes)", .path.display(), .size, .max_size)]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<git2::Error> for Error {
    fn from(e: git2::Error) -> Self {
        Error::Git {
            message: e.message().to_string(),
        }
    }
}

/// Result type using revet Error
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes per CLI spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Review passed (or coverage state is acceptable)
    Success = 0,
    /// Review found critical issues, or coverage is stale/regressed
    ReviewFailed = 1,
    /// Configuration, argument, or repository error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::NotARepository { .. } => {
                ExitCode::ConfigError
            }
            Error::Io { .. }
            | Error::Git { .. }
            | Error::Cache { .. }
            | Error::FileTooLarge { .. }
            | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
