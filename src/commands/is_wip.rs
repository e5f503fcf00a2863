//! Command: report whether the current branch is a work in progress.
use anyhow::Result;

use super::install::resolve_root;
use crate::cli::GlobalOpts;
use crate::git;

/// Returns `true` when the branch checked out in the project root is a work
/// in progress.  A detached `HEAD` is not.
///
/// # Errors
///
/// Returns an error if the project root is not inside a git repository.
pub fn run(global: &GlobalOpts) -> Result<bool> {
    let root = resolve_root(global)?;
    let branch = git::current_branch(&root)?;
    tracing::debug!("current branch: {}", branch.as_deref().unwrap_or("(detached)"));
    Ok(branch.is_some_and(|b| git::is_wip_branch(&b)))
}
