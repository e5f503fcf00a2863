//! Git repository queries and configuration.
use std::path::Path;

use anyhow::{Context as _, Result};

/// Name of the branch `HEAD` points at, or `None` when `HEAD` is detached.
///
/// Works on freshly initialised repositories whose branch has no commits yet.
///
/// # Errors
///
/// Returns an error if no repository contains `dir` or `HEAD` is unreadable.
pub fn current_branch(dir: &Path) -> Result<Option<String>> {
    let repo = git2::Repository::discover(dir)
        .with_context(|| format!("no git repository at {}", dir.display()))?;
    let head = repo.find_reference("HEAD").context("reading HEAD")?;
    Ok(head
        .symbolic_target()
        .and_then(|target| target.strip_prefix("refs/heads/"))
        .map(String::from))
}

/// Returns `true` when `branch` marks work in progress.
///
/// A branch is a work in progress when one of its path segments, other than
/// the last, is literally `wip` (case-insensitive): `wip/login`,
/// `alice/WIP/login`.
#[must_use]
pub fn is_wip_branch(branch: &str) -> bool {
    let mut segments: Vec<&str> = branch.split('/').collect();
    segments.pop();
    segments.iter().any(|s| s.eq_ignore_ascii_case("wip"))
}

/// Returns `true` when the branch checked out in `dir` is a work in progress.
///
/// # Errors
///
/// Returns an error if the repository cannot be opened.
pub fn is_wip(dir: &Path) -> Result<bool> {
    Ok(current_branch(dir)?.is_some_and(|branch| is_wip_branch(&branch)))
}

/// Point `core.hooksPath` of the repository at `root` to `hooks_dir`.
///
/// # Errors
///
/// Returns [`git2::Error`] if the repository or its config cannot be opened
/// or written.
pub fn set_hooks_path(root: &Path, hooks_dir: &str) -> Result<(), git2::Error> {
    let repo = git2::Repository::open(root)?;
    let mut config = repo.config()?;
    config.set_str("core.hooksPath", hooks_dir)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn init_repo_on(branch: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        repo.set_head(&format!("refs/heads/{branch}")).unwrap();
        dir
    }

    #[test]
    fn wip_prefix_matches() {
        assert!(is_wip_branch("wip/login"));
        assert!(is_wip_branch("WIP/login"));
        assert!(is_wip_branch("feature/Wip/login"));
        assert!(is_wip_branch("a/b/wip/c"));
    }

    #[test]
    fn non_wip_branches() {
        assert!(!is_wip_branch("main"));
        assert!(!is_wip_branch("wip"));
        assert!(!is_wip_branch("feature/wip"));
        assert!(!is_wip_branch("wipe/login"));
        assert!(!is_wip_branch("feature/swip/x"));
        assert!(!is_wip_branch(""));
    }

    #[test]
    fn current_branch_on_unborn_repository() {
        let dir = init_repo_on("wip/first");
        assert_eq!(
            current_branch(dir.path()).unwrap(),
            Some("wip/first".to_string())
        );
        assert!(is_wip(dir.path()).unwrap());
    }

    #[test]
    fn current_branch_from_subdirectory() {
        let dir = init_repo_on("main");
        let sub = dir.path().join("src");
        std::fs::create_dir(&sub).unwrap();
        assert_eq!(current_branch(&sub).unwrap(), Some("main".to_string()));
        assert!(!is_wip(&sub).unwrap());
    }

    #[test]
    fn current_branch_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        // The temp dir might itself live inside a repository on some hosts.
        if git2::Repository::discover(dir.path()).is_err() {
            assert!(current_branch(dir.path()).is_err());
        }
    }

    #[test]
    fn set_hooks_path_writes_local_config() {
        let dir = init_repo_on("main");
        set_hooks_path(dir.path(), ".githooks").unwrap();
        let repo = git2::Repository::open(dir.path()).unwrap();
        let config = repo.config().unwrap().open_level(git2::ConfigLevel::Local).unwrap();
        assert_eq!(config.get_string("core.hooksPath").unwrap(), ".githooks");
    }
}
