//! Top-level subcommand handlers.  These are the `anyhow` boundary: typed
//! errors from the library are propagated with `?`.
pub mod install;
pub mod is_wip;
