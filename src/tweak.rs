//! Pre-deployment customization of the artifact and hook registries.
//!
//! A [`Tweaks`] implementation receives each freshly built default registry
//! exactly once per install and returns the registry that is actually
//! deployed.
use std::fmt;

use anyhow::{Result, bail};

use crate::config::ProjectConfig;
use crate::registry::{ArtifactRegistry, HookEntry, HookRegistry, defaults};

/// Registry transforms applied before deployment.  Both default to identity.
pub trait Tweaks: Send + Sync + fmt::Debug {
    /// Transform the artifact registry.
    ///
    /// # Errors
    ///
    /// Any error aborts the install before a file is written.
    fn artifacts(&self, registry: ArtifactRegistry) -> Result<ArtifactRegistry> {
        Ok(registry)
    }

    /// Transform the hook registry.
    ///
    /// # Errors
    ///
    /// Any error aborts the install before a file is written.
    fn hooks(&self, registry: HookRegistry) -> Result<HookRegistry> {
        Ok(registry)
    }
}

/// Deploys the defaults unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTweaks;

impl Tweaks for NoTweaks {}

type ArtifactFn = Box<dyn Fn(ArtifactRegistry) -> Result<ArtifactRegistry> + Send + Sync>;
type HookFn = Box<dyn Fn(HookRegistry) -> Result<HookRegistry> + Send + Sync>;

/// Tweaks built from closures, for embedders.
///
/// ```
/// use js_rules::tweak::{FnTweaks, Tweaks};
/// use js_rules::registry::HookRegistry;
///
/// let tweaks = FnTweaks::new().on_hooks(|mut hooks| {
///     hooks.remove("pre-push");
///     Ok(hooks)
/// });
/// assert!(tweaks.hooks(HookRegistry::new()).is_ok());
/// ```
#[derive(Default)]
pub struct FnTweaks {
    artifacts: Option<ArtifactFn>,
    hooks: Option<HookFn>,
}

impl FnTweaks {
    /// Identity tweaks; add closures with [`on_artifacts`](Self::on_artifacts)
    /// and [`on_hooks`](Self::on_hooks).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artifact registry transform.
    #[must_use]
    pub fn on_artifacts<F>(mut self, f: F) -> Self
    where
        F: Fn(ArtifactRegistry) -> Result<ArtifactRegistry> + Send + Sync + 'static,
    {
        self.artifacts = Some(Box::new(f));
        self
    }

    /// Set the hook registry transform.
    #[must_use]
    pub fn on_hooks<F>(mut self, f: F) -> Self
    where
        F: Fn(HookRegistry) -> Result<HookRegistry> + Send + Sync + 'static,
    {
        self.hooks = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for FnTweaks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTweaks")
            .field("artifacts", &self.artifacts.is_some())
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

impl Tweaks for FnTweaks {
    fn artifacts(&self, registry: ArtifactRegistry) -> Result<ArtifactRegistry> {
        match &self.artifacts {
            Some(f) => f(registry),
            None => Ok(registry),
        }
    }

    fn hooks(&self, registry: HookRegistry) -> Result<HookRegistry> {
        match &self.hooks {
            Some(f) => f(registry),
            None => Ok(registry),
        }
    }
}

/// Tweaks driven by the project configuration file.
///
/// `skip` lists remove entries and must name existing ones;
/// `hooks.commands` adds or replaces hooks, wrapping their commands in the
/// documentation markers.
#[derive(Debug, Clone, Default)]
pub struct ConfigTweaks {
    config: ProjectConfig,
}

impl ConfigTweaks {
    /// Wrap a loaded configuration.
    #[must_use]
    pub const fn new(config: ProjectConfig) -> Self {
        Self { config }
    }
}

impl Tweaks for ConfigTweaks {
    fn artifacts(&self, mut registry: ArtifactRegistry) -> Result<ArtifactRegistry> {
        for target in &self.config.artifacts.skip {
            if registry.remove(target).is_none() {
                bail!("cannot skip unknown artifact {}", target.display());
            }
        }
        Ok(registry)
    }

    fn hooks(&self, mut registry: HookRegistry) -> Result<HookRegistry> {
        for name in &self.config.hooks.skip {
            if registry.remove(name).is_none() {
                bail!("cannot skip unknown hook {name}");
            }
        }
        for (name, commands) in &self.config.hooks.commands {
            registry.insert(HookEntry::new(
                name.clone(),
                defaults::tagged(commands.iter().cloned()),
            ));
        }
        Ok(registry)
    }
}
