//! Shared JavaScript project rules.
//!
//! Deploys a fixed set of linter and formatter configuration files into a
//! project and installs the git hooks that enforce them.
//!
//! - **[`format`]**: formatter pipelines rendering values to file text
//! - **[`registry`]**: the artifacts and hooks to deploy, with defaults
//! - **[`tweak`]**: pre-deployment customization of both registries
//! - **[`deploy`]**: the engine writing artifacts and installing hooks
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `is-wip`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod format;
pub mod git;
pub mod identity;
pub mod logging;
pub mod operations;
pub mod registry;
pub mod resources;
pub mod tweak;
