// Shared helpers for integration tests.
//
// Provides a temporary git repository and the install options wired to
// in-memory loggers, so each integration test runs in isolation.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use js_rules::deploy::InstallOptions;
use js_rules::identity::{PackageIdentity, StaticIdentity};
use js_rules::logging::BufferedLog;

/// A freshly initialised git repository backed by a [`tempfile::TempDir`].
pub struct TestRepo {
    /// Temporary directory holding the working tree.
    pub dir: tempfile::TempDir,
    /// Step lines received by the engine.
    pub steps: Arc<BufferedLog>,
    /// Result lines received by the engine.
    pub results: Arc<BufferedLog>,
}

impl TestRepo {
    /// Create an empty repository whose `HEAD` points at `main`.
    pub fn new() -> Self {
        Self::on_branch("main")
    }

    /// Create an empty repository whose `HEAD` points at `branch`.
    pub fn on_branch(branch: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repo = git2::Repository::init(dir.path()).expect("git init");
        repo.set_head(&format!("refs/heads/{branch}"))
            .expect("set HEAD");
        Self {
            dir,
            steps: Arc::new(BufferedLog::new()),
            results: Arc::new(BufferedLog::new()),
        }
    }

    /// Path to the working tree root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `relative` inside the working tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Content of `relative`, panicking if it cannot be read.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("read {relative}: {e}"))
    }

    /// Install options for this repository with a fixed identity
    /// (`js-rules`, `1.0.0`) and in-memory loggers.
    pub fn options(&self) -> InstallOptions {
        InstallOptions::new(self.root())
            .with_identity(Arc::new(StaticIdentity(PackageIdentity::new(
                "js-rules", "1.0.0",
            ))))
            .with_step_log(Arc::clone(&self.steps) as _)
            .with_result_log(Arc::clone(&self.results) as _)
    }

    /// Value of `core.hooksPath` in the repository's local config.
    pub fn hooks_path_config(&self) -> Option<String> {
        let repo = git2::Repository::open(self.root()).expect("open repo");
        let config = repo
            .config()
            .expect("repo config")
            .open_level(git2::ConfigLevel::Local)
            .expect("local config");
        config.get_string("core.hooksPath").ok()
    }
}
