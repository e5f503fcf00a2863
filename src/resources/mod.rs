//! Installable project resources.
pub mod hook;

pub use hook::{DEFAULT_HOOKS_DIR, GitHookInstaller, HookInstaller};
