// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles revet.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    project: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Project layout conventions.
    #[serde(default)]
    pub project: ProjectConfig,
}

/// Project layout conventions used for classification and test-path
/// rewriting. Defaults describe the Envoy-style tree the tool grew up on.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project name.
    pub name: Option<String>,

    /// Directory prefix holding production sources.
    #[serde(default = "ProjectConfig::default_source_root")]
    pub source_root: String,

    /// Directory prefix holding tests.
    #[serde(default = "ProjectConfig::default_test_root")]
    pub test_root: String,

    /// Directory prefix holding API definitions.
    #[serde(default = "ProjectConfig::default_api_root")]
    pub api_root: String,

    /// Directory prefix holding documentation.
    #[serde(default = "ProjectConfig::default_docs_root")]
    pub docs_root: String,

    /// Extension of body files (without the dot).
    #[serde(default = "ProjectConfig::default_source_ext")]
    pub source_ext: String,

    /// Extension of header files (without the dot).
    #[serde(default = "ProjectConfig::default_header_ext")]
    pub header_ext: String,

    /// Suffix a companion test file carries, including its extension.
    #[serde(default = "ProjectConfig::default_test_suffix")]
    pub test_suffix: String,

    /// Release-notes file that ought to change alongside source.
    #[serde(default = "ProjectConfig::default_changelog")]
    pub changelog: String,

    /// Custom ignore patterns.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            source_root: Self::default_source_root(),
            test_root: Self::default_test_root(),
            api_root: Self::default_api_root(),
            docs_root: Self::default_docs_root(),
            source_ext: Self::default_source_ext(),
            header_ext: Self::default_header_ext(),
            test_suffix: Self::default_test_suffix(),
            changelog: Self::default_changelog(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl ProjectConfig {
    fn default_source_root() -> String {
        "source/".to_string()
    }

    fn default_test_root() -> String {
        "test/".to_string()
    }

    fn default_api_root() -> String {
        "api/".to_string()
    }

    fn default_docs_root() -> String {
        "docs/".to_string()
    }

    fn default_source_ext() -> String {
        "cc".to_string()
    }

    fn default_header_ext() -> String {
        "h".to_string()
    }

    fn default_test_suffix() -> String {
        "_test.cc".to_string()
    }

    fn default_changelog() -> String {
        "changelogs/current.yaml".to_string()
    }
}

/// Ignore pattern configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IgnoreConfig {
    /// Glob patterns to skip entirely (e.g., "**/generated/**", "*.pb.cc").
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl IgnoreConfig {
    /// Compile patterns into a matcher. Bad globs are config errors.
    pub fn build_matcher(&self) -> Result<globset::GlobSet> {
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.patterns {
            let glob = globset::Glob::new(pattern).map_err(|e| Error::Config {
                message: format!("invalid ignore pattern `{}`: {}", pattern, e),
                path: None,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| Error::Config {
            message: format!("invalid ignore patterns: {}", e),
            path: None,
        })
    }
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "project"];

/// Known project keys in the config.
const KNOWN_PROJECT_KEYS: &[&str] = &[
    "name",
    "source_root",
    "test_root",
    "api_root",
    "docs_root",
    "source_ext",
    "header_ext",
    "test_suffix",
    "changelog",
    "ignore",
];

/// Locate the config file for a repository root, if present.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let candidate = root.join("revet.toml");
    candidate.exists().then_some(candidate)
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    // First check version
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade revet to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    // Parse full config
    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    // First validate version
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if flexible.version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                flexible.version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    // Collect top-level unknown keys
    let mut unknown_keys = BTreeSet::new();
    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            unknown_keys.insert(key.clone());
        }
    }
    for key in &unknown_keys {
        warn_unknown_key(path, key);
    }

    let project = match flexible.project {
        Some(toml::Value::Table(t)) => {
            for key in t.keys() {
                if !KNOWN_PROJECT_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("project.{}", key));
                }
            }

            let string_or = |key: &str, default: fn() -> String| -> String {
                t.get(key)
                    .and_then(|v| v.as_str())
                    .map(String::from)
                    .unwrap_or_else(default)
            };

            let ignore = match t.get("ignore") {
                Some(toml::Value::Table(ignore_table)) => {
                    let patterns = ignore_table
                        .get("patterns")
                        .and_then(|v| v.as_array())
                        .map(|arr| {
                            arr.iter()
                                .filter_map(|v| v.as_str().map(String::from))
                                .collect()
                        })
                        .unwrap_or_default();

                    for key in ignore_table.keys() {
                        if key != "patterns" {
                            warn_unknown_key(path, &format!("project.ignore.{}", key));
                        }
                    }

                    IgnoreConfig { patterns }
                }
                _ => IgnoreConfig::default(),
            };

            ProjectConfig {
                name: t
                    .get("name")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
                source_root: string_or("source_root", ProjectConfig::default_source_root),
                test_root: string_or("test_root", ProjectConfig::default_test_root),
                api_root: string_or("api_root", ProjectConfig::default_api_root),
                docs_root: string_or("docs_root", ProjectConfig::default_docs_root),
                source_ext: string_or("source_ext", ProjectConfig::default_source_ext),
                header_ext: string_or("header_ext", ProjectConfig::default_header_ext),
                test_suffix: string_or("test_suffix", ProjectConfig::default_test_suffix),
                changelog: string_or("changelog", ProjectConfig::default_changelog),
                ignore,
            }
        }
        _ => ProjectConfig::default(),
    };

    Ok(Config {
        version: flexible.version,
        project,
    })
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "revet: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
