//! Hook phase: install every hook, strictly in order.
use super::DeployContext;
use crate::error::DeployError;
use crate::registry::HookRegistry;
use crate::resources::HookInstaller;

/// Initialise the hooks directory, then reset and populate each hook of
/// `registry` in order, logging `<hooks_dir>/<name> deployed` after each.
///
/// # Errors
///
/// Returns [`DeployError::Hook`] on the first failure; later hooks are not
/// touched.
pub fn deploy_hooks(
    ctx: &DeployContext<'_>,
    installer: &dyn HookInstaller,
    registry: &HookRegistry,
) -> Result<(), DeployError> {
    installer.init()?;
    for hook in registry {
        installer.set(&hook.name, "")?;
        for command in &hook.commands {
            installer.add(&hook.name, command)?;
        }
        ctx.step_log.info(
            ctx.preamble,
            &format!("{}/{} deployed", ctx.hooks_dir.display(), hook.name),
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::HookError;
    use crate::logging::BufferedLog;
    use crate::operations::MockFileSystemOps;
    use crate::registry::HookEntry;
    use crate::resources::hook::MockHookInstaller;
    use mockall::{Sequence, predicate::eq};
    use std::path::{Path, PathBuf};

    fn ctx<'a>(fs: &'a MockFileSystemOps, log: &'a BufferedLog) -> DeployContext<'a> {
        DeployContext {
            root: Path::new("/p"),
            hooks_dir: Path::new(".githooks"),
            fs,
            step_log: log,
            preamble: "p:",
            parallel: false,
        }
    }

    fn registry() -> HookRegistry {
        HookRegistry::new()
            .with(HookEntry::new("pre-commit", ["A", "B"]))
            .with(HookEntry::new("pre-push", ["C"]))
    }

    #[test]
    fn calls_installer_in_strict_order() {
        let mut installer = MockHookInstaller::new();
        let mut seq = Sequence::new();
        installer
            .expect_init()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        for (name, commands) in [("pre-commit", vec!["A", "B"]), ("pre-push", vec!["C"])] {
            installer
                .expect_set()
                .with(eq(name), eq(""))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
            for command in commands {
                installer
                    .expect_add()
                    .with(eq(name), eq(command))
                    .times(1)
                    .in_sequence(&mut seq)
                    .returning(|_, _| Ok(()));
            }
        }

        let fs = MockFileSystemOps::new();
        let log = BufferedLog::new();
        deploy_hooks(&ctx(&fs, &log), &installer, &registry()).unwrap();
        assert_eq!(
            log.lines(),
            vec!["p: .githooks/pre-commit deployed", "p: .githooks/pre-push deployed"]
        );
    }

    #[test]
    fn failure_aborts_remaining_hooks() {
        let mut installer = MockHookInstaller::new();
        installer.expect_init().returning(|| Ok(()));
        installer.expect_set().returning(|_, _| Ok(()));
        installer
            .expect_add()
            .with(eq("pre-commit"), eq("A"))
            .returning(|_, _| {
                Err(HookError::MissingDirectory {
                    dir: PathBuf::from(".githooks"),
                })
            });
        installer
            .expect_add()
            .with(eq("pre-push"), eq("C"))
            .never();

        let fs = MockFileSystemOps::new();
        let log = BufferedLog::new();
        let err = deploy_hooks(&ctx(&fs, &log), &installer, &registry()).unwrap_err();
        assert!(matches!(
            err,
            DeployError::Hook(HookError::MissingDirectory { .. })
        ));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn init_failure_installs_nothing() {
        let mut installer = MockHookInstaller::new();
        installer.expect_init().returning(|| {
            Err(HookError::NotARepository {
                root: PathBuf::from("/p"),
            })
        });
        installer.expect_set().never();
        installer.expect_add().never();

        let fs = MockFileSystemOps::new();
        let log = BufferedLog::new();
        assert!(deploy_hooks(&ctx(&fs, &log), &installer, &registry()).is_err());
    }
}
