//! Artifact phase: render and write every configuration file.
use rayon::prelude::*;

use super::DeployContext;
use crate::error::{ArtifactError, DeployError};
use crate::registry::{ArtifactEntry, ArtifactRegistry};

/// Render and write every entry of `registry` under `ctx.root`.
///
/// Entries are independent: all are attempted (concurrently when
/// `ctx.parallel`), each successful write logs `<target> deployed`, and the
/// failures are returned together in registry order.
///
/// # Errors
///
/// Returns [`DeployError::Artifacts`] if at least one entry failed.
pub fn deploy_artifacts(
    ctx: &DeployContext<'_>,
    registry: &ArtifactRegistry,
) -> Result<(), DeployError> {
    let entries = registry.iter().as_slice();
    let results: Vec<Result<(), ArtifactError>> = if ctx.parallel {
        entries.par_iter().map(|entry| deploy_one(ctx, entry)).collect()
    } else {
        entries.iter().map(|entry| deploy_one(ctx, entry)).collect()
    };

    let errors: Vec<ArtifactError> = results.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DeployError::Artifacts(errors))
    }
}

fn deploy_one(ctx: &DeployContext<'_>, entry: &ArtifactEntry) -> Result<(), ArtifactError> {
    let text = entry.render().map_err(|source| ArtifactError::Render {
        target: entry.target.clone(),
        source,
    })?;
    ctx.fs
        .write_file(&ctx.root.join(&entry.target), &text)
        .map_err(|source| ArtifactError::Write {
            target: entry.target.clone(),
            source,
        })?;
    ctx.step_log
        .info(ctx.preamble, &format!("{} deployed", entry.target.display()));
    Ok(())
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
    use crate::format::{Lines, Pipeline, Yaml};
    use crate::logging::BufferedLog;
    use crate::operations::MockFileSystemOps;
    use serde_json::json;
    use std::path::Path;

    fn ctx<'a>(
        fs: &'a MockFileSystemOps,
        log: &'a BufferedLog,
        parallel: bool,
    ) -> DeployContext<'a> {
        DeployContext {
            root: Path::new("/p"),
            hooks_dir: Path::new(".githooks"),
            fs,
            step_log: log,
            preamble: "",
            parallel,
        }
    }

    fn registry() -> ArtifactRegistry {
        ArtifactRegistry::new()
            .with(ArtifactEntry::new("a", json!(["x"]), Pipeline::new().then(Lines)))
            .with(ArtifactEntry::new("b", json!({"k": 1}), Pipeline::new().then(Yaml)))
            .with(ArtifactEntry::new("c", json!("scalar"), Pipeline::new().then(Yaml)))
            .with(ArtifactEntry::new("d", json!([]), Pipeline::new().then(Lines)))
    }

    #[test]
    fn collects_every_failure_in_registry_order() {
        for parallel in [true, false] {
            let fs = MockFileSystemOps::new().failing_on("/p/a");
            let log = BufferedLog::new();
            let err = deploy_artifacts(&ctx(&fs, &log, parallel), &registry()).unwrap_err();

            let DeployError::Artifacts(errors) = err else {
                unreachable!("expected artifact errors");
            };
            assert_eq!(errors.len(), 2);
            assert!(matches!(&errors[0], ArtifactError::Write { target, .. } if target == Path::new("a")));
            assert!(matches!(&errors[1], ArtifactError::Render { target, .. } if target == Path::new("c")));

            assert_eq!(fs.contents(Path::new("/p/b")).as_deref(), Some("k: 1\n"));
            assert_eq!(fs.contents(Path::new("/p/d")).as_deref(), Some(""));
            let mut lines = log.lines();
            lines.sort();
            assert_eq!(lines, vec!["b deployed", "d deployed"]);
        }
    }

    #[test]
    fn empty_registry_succeeds() {
        let fs = MockFileSystemOps::new();
        let log = BufferedLog::new();
        deploy_artifacts(&ctx(&fs, &log, true), &ArtifactRegistry::new()).unwrap();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn sequential_steps_follow_registry_order() {
        let fs = MockFileSystemOps::new();
        let log = BufferedLog::new();
        let registry = ArtifactRegistry::new()
            .with(ArtifactEntry::new("z", json!(["1"]), Pipeline::new().then(Lines)))
            .with(ArtifactEntry::new("y", json!(["2"]), Pipeline::new().then(Lines)));
        deploy_artifacts(&ctx(&fs, &log, false), &registry).unwrap();
        assert_eq!(log.lines(), vec!["z deployed", "y deployed"]);
    }
}
