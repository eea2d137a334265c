// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Starter configuration for `revet init`.

use std::path::Path;

use crate::error::{Error, Result};

/// Contents written by `revet init`. Every key shows its default so a
/// project only has to uncomment what it changes.
pub const STARTER_CONFIG: &str = r#"version = 1

[project]
# name = "my-project"
# source_root = "source/"
# test_root = "test/"
# api_root = "api/"
# docs_root = "docs/"
# source_ext = "cc"
# header_ext = "h"
# test_suffix = "_test.cc"
# changelog = "changelogs/current.yaml"

[project.ignore]
# patterns = ["**/generated/**", "*.pb.cc"]
patterns = []
"#;

/// Write the starter config into `root`.
///
/// Refuses to clobber an existing file unless `force` is set.
pub fn write_starter_config(root: &Path, force: bool) -> Result<()> {
    let path = root.join("revet.toml");

    if path.exists() && !force {
        return Err(Error::Config {
            message: "revet.toml already exists (use --force to overwrite)".to_string(),
            path: Some(path),
        });
    }

    std::fs::write(&path, STARTER_CONFIG).map_err(|e| Error::Io { path, source: e })
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
