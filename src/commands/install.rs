//! Command: deploy configuration files and git hooks.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, InstallOpts};
use crate::config::{self, ProjectConfig};
use crate::deploy::{self, InstallOptions};
use crate::identity::ManifestIdentity;
use crate::tweak::ConfigTweaks;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the project root or configuration file cannot be
/// loaded, or if deployment fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts) -> Result<()> {
    let options = build_options(global, opts)?;
    tracing::debug!("{options:?}");
    deploy::install(&options)?;
    Ok(())
}

/// Translate command-line options and the project configuration file into
/// [`InstallOptions`].
///
/// # Errors
///
/// Returns an error if the project root cannot be resolved or the
/// configuration file is unreadable or invalid.
pub fn build_options(global: &GlobalOpts, opts: &InstallOpts) -> Result<InstallOptions> {
    let root = resolve_root(global)?;
    let project = match &opts.config {
        Some(path) => ProjectConfig::load_required(path)?,
        None => ProjectConfig::load(&root.join(config::FILE_NAME))?,
    };

    let mut options = InstallOptions::new(&root)
        .with_hooks_dir(&opts.hooks_dir)
        .with_parallel(global.parallel);
    if let Some(warning) = opts
        .edit_warning
        .clone()
        .or_else(|| project.edit_warning.clone())
    {
        options = options.with_edit_warning(warning);
    }
    if let Some(dir) = &opts.manifest_dir {
        options = options.with_identity(Arc::new(ManifestIdentity::package_json(root.join(dir))));
    }
    Ok(options.with_tweaks(Arc::new(ConfigTweaks::new(project))))
}

/// Resolve the project root: `--root` if given, else the current directory.
///
/// # Errors
///
/// Returns an error if the directory does not exist or the current directory
/// cannot be determined.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let root = match &global.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    dunce::canonicalize(&root).with_context(|| format!("project root {} not found", root.display()))
}
