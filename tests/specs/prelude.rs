// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::*;

use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the revet binary.
pub fn revet_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("revet"))
}

/// A throwaway git repository with the Envoy-style layout conventions.
pub struct TestRepo {
    pub dir: TempDir,
}

impl TestRepo {
    /// Empty repository on branch `main` with commit identity set.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Self { dir };
        repo.git(&["init", "--initial-branch=main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo
    }

    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-m", message]);
    }

    pub fn checkout_new(&self, branch: &str) {
        self.git(&["checkout", "-b", branch]);
    }

    /// A revet command running inside this repository.
    pub fn revet(&self) -> Command {
        let mut cmd = revet_cmd();
        cmd.current_dir(self.dir.path());
        cmd
    }
}

/// Repository with one committed source/test pair on main and an empty
/// `feature` branch checked out.
pub fn repo_on_feature_branch() -> TestRepo {
    let repo = TestRepo::new();
    repo.write(
        "source/common/buffer.cc",
        "int capacity() { return 64; }\n",
    );
    repo.write(
        "test/common/buffer_test.cc",
        "TEST(BufferTest, Capacity) { EXPECT_EQ(64, capacity()); }\n",
    );
    repo.commit_all("initial");
    repo.checkout_new("feature");
    repo
}
