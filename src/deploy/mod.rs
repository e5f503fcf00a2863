//! Deployment engine: customize the default registries, write every
//! artifact, install every hook, and report one result line.
//!
//! ```no_run
//! use js_rules::deploy::{InstallOptions, install};
//!
//! install(&InstallOptions::new("/path/to/project")).ok();
//! ```
mod artifacts;
mod hooks;

pub use artifacts::deploy_artifacts;
pub use hooks::deploy_hooks;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::DeployError;
use crate::format::HeaderStyle;
use crate::identity::{BuiltinIdentity, IdentitySource, PackageIdentity};
use crate::logging::{Log, Logger};
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::registry::defaults;
use crate::resources::{DEFAULT_HOOKS_DIR, GitHookInstaller, HookInstaller};
use crate::tweak::{NoTweaks, Tweaks};

/// Message of the result line on success.
pub const SUCCESS_MESSAGE: &str = "successfully deployed";

/// Executable the generated hooks call back into.
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Everything an [`install`] run depends on.
///
/// Built with [`InstallOptions::new`] and adjusted with the `with_*`
/// methods.  Defaults write to the real filesystem, log through `tracing`,
/// and take the identity compiled into this binary.
#[derive(Clone)]
pub struct InstallOptions {
    root: PathBuf,
    hooks_dir: PathBuf,
    parallel: bool,
    program: String,
    edit_warning: Option<String>,
    log_preamble: Option<String>,
    tweaks: Arc<dyn Tweaks>,
    step_log: Arc<dyn Log>,
    result_log: Arc<dyn Log>,
    fs: Arc<dyn FileSystemOps>,
    identity: Arc<dyn IdentitySource>,
    installer: Option<Arc<dyn HookInstaller>>,
}

impl InstallOptions {
    /// Default options for the project at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            hooks_dir: PathBuf::from(DEFAULT_HOOKS_DIR),
            parallel: true,
            program: PROGRAM_NAME.to_string(),
            edit_warning: None,
            log_preamble: None,
            tweaks: Arc::new(NoTweaks),
            step_log: Arc::new(Logger::step("install")),
            result_log: Arc::new(Logger::result("install")),
            fs: Arc::new(SystemFileSystemOps),
            identity: Arc::new(BuiltinIdentity),
            installer: None,
        }
    }

    /// Hooks directory, relative to the project root.
    #[must_use]
    pub fn with_hooks_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.hooks_dir = dir.into();
        self
    }

    /// Write artifacts concurrently (`true`, the default) or one by one.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Command the pre-push hook runs to detect work-in-progress branches.
    ///
    /// Independent of the identity, whose name may be a scoped npm package.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Banner written into generated files instead of the identity's.
    #[must_use]
    pub fn with_edit_warning(mut self, warning: impl Into<String>) -> Self {
        self.edit_warning = Some(warning.into());
        self
    }

    /// Log prefix used instead of the identity's.
    #[must_use]
    pub fn with_log_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.log_preamble = Some(preamble.into());
        self
    }

    /// Registry transforms applied before deployment.
    #[must_use]
    pub fn with_tweaks(mut self, tweaks: Arc<dyn Tweaks>) -> Self {
        self.tweaks = tweaks;
        self
    }

    /// Sink for step lines.
    #[must_use]
    pub fn with_step_log(mut self, log: Arc<dyn Log>) -> Self {
        self.step_log = log;
        self
    }

    /// Sink for the result line.
    #[must_use]
    pub fn with_result_log(mut self, log: Arc<dyn Log>) -> Self {
        self.result_log = log;
        self
    }

    /// Filesystem used for artifacts and, unless overridden, hooks.
    #[must_use]
    pub fn with_fs(mut self, fs: Arc<dyn FileSystemOps>) -> Self {
        self.fs = fs;
        self
    }

    /// Source of the tool name and version.
    #[must_use]
    pub fn with_identity(mut self, identity: Arc<dyn IdentitySource>) -> Self {
        self.identity = identity;
        self
    }

    /// Hook installer used instead of a [`GitHookInstaller`].
    #[must_use]
    pub fn with_installer(mut self, installer: Arc<dyn HookInstaller>) -> Self {
        self.installer = Some(installer);
        self
    }

    /// Project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Hooks directory, relative to the project root.
    #[must_use]
    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn installer(&self) -> Arc<dyn HookInstaller> {
        self.installer.clone().unwrap_or_else(|| {
            Arc::new(GitHookInstaller::new(
                self.root.clone(),
                self.hooks_dir.clone(),
                Arc::clone(&self.fs),
            ))
        })
    }
}

impl fmt::Debug for InstallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstallOptions")
            .field("root", &self.root)
            .field("hooks_dir", &self.hooks_dir)
            .field("parallel", &self.parallel)
            .field("program", &self.program)
            .field("edit_warning", &self.edit_warning)
            .field("log_preamble", &self.log_preamble)
            .field("tweaks", &self.tweaks)
            .field("fs", &self.fs)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Shared state of both deployment phases.
#[derive(Debug, Clone, Copy)]
pub struct DeployContext<'a> {
    /// Project root every artifact target is relative to.
    pub root: &'a Path,
    /// Hooks directory as shown in step lines.
    pub hooks_dir: &'a Path,
    /// Filesystem artifacts are written through.
    pub fs: &'a dyn FileSystemOps,
    /// Sink for step lines.
    pub step_log: &'a dyn Log,
    /// Prefix of every step line.
    pub preamble: &'a str,
    /// Whether the artifact phase runs concurrently.
    pub parallel: bool,
}

/// Deploy the default artifacts and hooks into the project.
///
/// Logs one step line per deployed artifact and hook, then exactly one
/// result line: [`SUCCESS_MESSAGE`], or `installation failed: <error>` on
/// the result log's error channel.
///
/// # Errors
///
/// Returns the first [`DeployError`] that stopped the run, unchanged.  A
/// failing artifact phase skips the hook phase.
pub fn install(options: &InstallOptions) -> Result<(), DeployError> {
    let identity = match options.identity.resolve() {
        Ok(identity) => identity,
        Err(e) => {
            let preamble = options.log_preamble.as_deref().unwrap_or_default();
            return Err(report_failure(options, preamble, e.into()));
        }
    };
    let preamble = options
        .log_preamble
        .clone()
        .unwrap_or_else(|| identity.log_preamble());

    match deploy(options, &identity, &preamble) {
        Ok(()) => {
            options.result_log.info(&preamble, SUCCESS_MESSAGE);
            Ok(())
        }
        Err(e) => Err(report_failure(options, &preamble, e)),
    }
}

fn report_failure(options: &InstallOptions, preamble: &str, error: DeployError) -> DeployError {
    options
        .result_log
        .error(preamble, &format!("installation failed: {error}"));
    error
}

fn deploy(
    options: &InstallOptions,
    identity: &PackageIdentity,
    preamble: &str,
) -> Result<(), DeployError> {
    let warning = options
        .edit_warning
        .clone()
        .unwrap_or_else(|| identity.edit_warning());
    let header = HeaderStyle::hashed().header(warning);

    let artifacts = options
        .tweaks
        .artifacts(defaults::artifacts(&header))
        .map_err(|e| customization("artifact", &e))?;
    let hooks = options
        .tweaks
        .hooks(defaults::hooks(&options.program))
        .map_err(|e| customization("hook", &e))?;

    let ctx = DeployContext {
        root: &options.root,
        hooks_dir: &options.hooks_dir,
        fs: options.fs.as_ref(),
        step_log: options.step_log.as_ref(),
        preamble,
        parallel: options.parallel,
    };
    ctx.step_log.debug(
        preamble,
        &format!(
            "deploying {} artifacts and {} hooks into {}",
            artifacts.len(),
            hooks.len(),
            options.root.display()
        ),
    );
    deploy_artifacts(&ctx, &artifacts)?;
    deploy_hooks(&ctx, options.installer().as_ref(), &hooks)
}

fn customization(registry: &'static str, error: &anyhow::Error) -> DeployError {
    DeployError::Customization {
        registry,
        message: format!("{error:#}"),
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::unreachable
)]
mod tests {
    use super::*;
    use crate::error::{ArtifactError, HookError, LookupError, ParseError};
    use crate::identity::StaticIdentity;
    use crate::logging::{BufferedLog, Level};
    use crate::operations::MockFileSystemOps;
    use crate::registry::defaults::{
        ESLINT_CONFIG, ESLINT_IGNORE, PRE_COMMIT, PRETTIER_CONFIG, PRETTIER_IGNORE,
    };
    use crate::resources::hook::script;
    use crate::format::{Pipeline, Yaml};
    use crate::registry::ArtifactEntry;
    use crate::tweak::FnTweaks;

    #[derive(Debug)]
    struct FailingIdentity;

    impl IdentitySource for FailingIdentity {
        fn resolve(&self) -> Result<PackageIdentity, LookupError> {
            Err(ParseError {
                path: PathBuf::from("/repo/package.json"),
                message: "EOF while parsing".to_string(),
            }
            .into())
        }
    }

    struct Harness {
        fs: Arc<MockFileSystemOps>,
        steps: Arc<BufferedLog>,
        results: Arc<BufferedLog>,
    }

    impl Harness {
        fn new(fs: MockFileSystemOps) -> Self {
            Self {
                fs: Arc::new(fs),
                steps: Arc::new(BufferedLog::new()),
                results: Arc::new(BufferedLog::new()),
            }
        }

        fn repo() -> Self {
            Self::new(MockFileSystemOps::new().with_dir("/repo/.git"))
        }

        fn options(&self) -> InstallOptions {
            let fs: Arc<dyn FileSystemOps> = Arc::clone(&self.fs) as _;
            InstallOptions::new("/repo")
                .with_fs(Arc::clone(&fs))
                .with_identity(Arc::new(StaticIdentity(PackageIdentity::new(
                    "js-rules", "1.0.0",
                ))))
                .with_step_log(Arc::clone(&self.steps) as _)
                .with_result_log(Arc::clone(&self.results) as _)
                .with_installer(Arc::new(
                    GitHookInstaller::new("/repo", DEFAULT_HOOKS_DIR, fs).without_git_config(),
                ))
        }
    }

    #[test]
    fn defaults_deploy_four_artifacts_and_two_hooks() {
        let h = Harness::repo();
        install(&h.options()).unwrap();

        assert_eq!(
            h.steps.lines(),
            vec![
                "js-rules[1.0.0]: .eslintrc.yaml deployed",
                "js-rules[1.0.0]: .eslintignore deployed",
                "js-rules[1.0.0]: .prettierrc.yaml deployed",
                "js-rules[1.0.0]: .prettierignore deployed",
                "js-rules[1.0.0]: .githooks/pre-commit deployed",
                "js-rules[1.0.0]: .githooks/pre-push deployed",
            ]
        );
        assert_eq!(
            h.results.lines(),
            vec!["js-rules[1.0.0]: successfully deployed"]
        );
        for target in [ESLINT_CONFIG, ESLINT_IGNORE, PRETTIER_CONFIG, PRETTIER_IGNORE] {
            let text = h.fs.contents(&Path::new("/repo").join(target)).unwrap();
            assert!(text.starts_with(
                "# DO NOT EDIT THIS FILE AS IT IS GENERATED BY js-rules\n"
            ));
        }
    }

    #[test]
    fn sequential_mode_has_identical_output() {
        let parallel = Harness::repo();
        install(&parallel.options()).unwrap();
        let sequential = Harness::repo();
        install(&sequential.options().with_parallel(false)).unwrap();

        assert_eq!(parallel.steps.lines(), sequential.steps.lines());
        for path in parallel.fs.written_paths() {
            assert_eq!(parallel.fs.contents(&path), sequential.fs.contents(&path));
        }
    }

    #[test]
    fn overrides_replace_banner_and_preamble() {
        let h = Harness::repo();
        install(
            &h.options()
                .with_edit_warning("generated")
                .with_log_preamble("[setup]"),
        )
        .unwrap();
        let text = h.fs.contents(Path::new("/repo/.eslintignore")).unwrap();
        assert_eq!(text, "# generated\nnode_modules\n");
        assert_eq!(h.results.lines(), vec!["[setup] successfully deployed"]);
    }

    #[test]
    fn tweak_removing_an_artifact_skips_its_file() {
        let h = Harness::repo();
        let tweaks = FnTweaks::new().on_artifacts(|mut a| {
            a.remove(PRETTIER_IGNORE);
            Ok(a)
        });
        install(&h.options().with_tweaks(Arc::new(tweaks))).unwrap();
        assert!(h.fs.contents(Path::new("/repo/.prettierignore")).is_none());
        assert!(h.fs.contents(Path::new("/repo/.prettierrc.yaml")).is_some());
        assert_eq!(h.steps.lines().len(), 5);
    }

    #[test]
    fn hook_commands_written_in_order() {
        let h = Harness::repo();
        let tweaks = FnTweaks::new().on_hooks(|_| {
            Ok(crate::registry::HookRegistry::new()
                .with(crate::registry::HookEntry::new(PRE_COMMIT, ["A", "B", "C"])))
        });
        install(&h.options().with_tweaks(Arc::new(tweaks))).unwrap();
        assert_eq!(
            h.fs.contents(Path::new("/repo/.githooks/pre-commit")).unwrap(),
            format!("{}A\nB\nC\n", script(""))
        );
        assert!(h.fs.contents(Path::new("/repo/.githooks/pre-push")).is_none());
    }

    #[test]
    fn pre_push_checks_wip_with_tool_name() {
        let h = Harness::repo();
        install(&h.options()).unwrap();
        let text = h.fs.contents(Path::new("/repo/.githooks/pre-push")).unwrap();
        assert!(text.contains("js-rules is-wip || npx --no-install eslint . && npm test\n"));
        assert!(h.fs.is_executable(Path::new("/repo/.githooks/pre-push")));
    }

    #[test]
    fn pre_push_uses_program_not_package_name() {
        let h = Harness::repo();
        let options = h.options().with_identity(Arc::new(StaticIdentity(PackageIdentity::new(
            "@r2d2bzh/js-rules",
            "2.0.0",
        ))));
        install(&options).unwrap();
        let text = h.fs.contents(Path::new("/repo/.githooks/pre-push")).unwrap();
        assert!(text.contains(&format!("\n{PROGRAM_NAME} is-wip || ")), "{text}");
        assert!(!text.contains("@r2d2bzh"), "{text}");
        assert_eq!(
            h.results.lines(),
            vec!["@r2d2bzh/js-rules[2.0.0]: successfully deployed"]
        );

        let h = Harness::repo();
        install(&h.options().with_program("npx js-rules")).unwrap();
        let text = h.fs.contents(Path::new("/repo/.githooks/pre-push")).unwrap();
        assert!(text.contains("npx js-rules is-wip || npx --no-install eslint . && npm test\n"));
    }

    #[test]
    fn render_failure_fails_install_and_is_logged_last() {
        let h = Harness::repo();
        let tweaks = FnTweaks::new().on_artifacts(|a| {
            Ok(a.with(ArtifactEntry::new(
                "broken.yaml",
                serde_json::json!("scalar"),
                Pipeline::new().then(Yaml),
            )))
        });
        let err = install(&h.options().with_tweaks(Arc::new(tweaks))).unwrap_err();
        let DeployError::Artifacts(errors) = &err else {
            unreachable!("expected artifact errors, got {err:?}");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ArtifactError::Render { target, .. } if target == Path::new("broken.yaml")));

        assert!(h.fs.contents(Path::new("/repo/.githooks/pre-commit")).is_none());
        let results = h.results.entries();
        assert_eq!(results.len(), 1);
        let last = h.results.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert!(last.message.starts_with("installation failed: cannot render broken.yaml"));
        assert!(!h.results.lines().iter().any(|l| l.ends_with(SUCCESS_MESSAGE)));
    }

    #[test]
    fn failing_tweak_aborts_before_any_write() {
        let h = Harness::repo();
        let tweaks = FnTweaks::new().on_hooks(|_| anyhow::bail!("bad hooks"));
        let err = install(&h.options().with_tweaks(Arc::new(tweaks))).unwrap_err();
        assert!(matches!(
            err,
            DeployError::Customization {
                registry: "hook",
                ..
            }
        ));
        assert!(h.fs.written_paths().is_empty());
        assert!(h.steps.lines().is_empty());
        assert_eq!(
            h.results.lines(),
            vec!["js-rules[1.0.0]: installation failed: customization of the hook registry failed: bad hooks"]
        );
    }

    #[test]
    fn write_failure_reported_last_and_hooks_skipped() {
        let h = Harness::new(
            MockFileSystemOps::new()
                .with_dir("/repo/.git")
                .failing_on("/repo/.eslintignore"),
        );
        let err = install(&h.options()).unwrap_err();
        let DeployError::Artifacts(errors) = &err else {
            unreachable!("expected artifact errors, got {err:?}");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ArtifactError::Write { target, .. } if target.ends_with(".eslintignore")));

        assert_eq!(h.steps.lines().len(), 3, "other artifacts still written");
        assert!(h.fs.contents(Path::new("/repo/.githooks/pre-commit")).is_none());
        let last = h.results.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert!(last.message.starts_with("installation failed: cannot write"));
    }

    #[test]
    fn hook_failure_is_reported() {
        let h = Harness::new(MockFileSystemOps::new());
        let err = install(&h.options()).unwrap_err();
        assert!(matches!(err, DeployError::Hook(HookError::NotARepository { .. })));
        assert_eq!(h.steps.lines().len(), 4);
        assert_eq!(
            h.results.lines(),
            vec!["js-rules[1.0.0]: installation failed: .git can't be found in /repo"]
        );
    }

    #[test]
    fn lookup_failure_logs_without_preamble() {
        let h = Harness::repo();
        let err = install(&h.options().with_identity(Arc::new(FailingIdentity))).unwrap_err();
        assert!(matches!(err, DeployError::Lookup(LookupError::Parse(_))));
        assert!(h.fs.written_paths().is_empty());
        assert_eq!(
            h.results.lines(),
            vec![
                "installation failed: failed to extract JSON from /repo/package.json (EOF while parsing)"
            ]
        );
    }

    #[test]
    fn install_twice_is_byte_identical() {
        let h = Harness::repo();
        install(&h.options()).unwrap();
        let first: Vec<_> = h
            .fs
            .written_paths()
            .into_iter()
            .map(|p| (h.fs.contents(&p), p))
            .collect();
        install(&h.options()).unwrap();
        let second: Vec<_> = h
            .fs
            .written_paths()
            .into_iter()
            .map(|p| (h.fs.contents(&p), p))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn options_debug_lists_configuration() {
        let text = format!("{:?}", InstallOptions::new("/repo").with_parallel(false));
        assert!(text.contains("parallel: false"), "{text}");
        assert!(text.contains("\"/repo\""), "{text}");
    }
}
