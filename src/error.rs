//! Domain-specific error types for the deployment engine.
//!
//! Library modules return the typed errors below while command handlers at
//! the CLI boundary convert them to [`anyhow::Error`] via the standard `?`
//! operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DeployError
//! ├── Lookup(LookupError)          - tool identity cannot be resolved
//! │   └── Parse(ParseError)        - JSON manifest could not be parsed
//! ├── Customization { .. }         - a registry tweak failed
//! ├── Artifacts(Vec<ArtifactError>)- one or more configuration files failed
//! │   ├── Render { .. }            - formatter pipeline rejected the value
//! │   └── Write { .. }             - the file could not be written
//! └── Hook(HookError)              - hook installation aborted
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by [`crate::deploy::install`].
#[derive(Error, Debug)]
pub enum DeployError {
    /// The tool's own name or version could not be resolved.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A caller-supplied registry transform failed.
    #[error("customization of the {registry} registry failed: {message}")]
    Customization {
        /// Which registry was being transformed (`"artifact"` or `"hook"`).
        registry: &'static str,
        /// Rendered error chain returned by the transform.
        message: String,
    },

    /// At least one artifact failed to render or write.
    #[error("{}", summarize_artifacts(.0))]
    Artifacts(Vec<ArtifactError>),

    /// Hook installation failed; remaining hooks were not installed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

fn summarize_artifacts(errors: &[ArtifactError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that arise while resolving the tool's identity.
#[derive(Error, Debug)]
pub enum LookupError {
    /// No manifest file was found in `start` or any of its ancestors.
    #[error("unable to find {file_name} above {}", .start.display())]
    ManifestNotFound {
        /// Directory the upward search started from.
        start: PathBuf,
        /// File name that was searched for.
        file_name: String,
    },

    /// The manifest was found but could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The manifest lacks a required string field.
    #[error("{} has no string field '{field}'", .path.display())]
    MissingField {
        /// Manifest path.
        path: PathBuf,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// A JSON file could not be read or parsed.
#[derive(Error, Debug)]
#[error("failed to extract JSON from {} ({message})", .path.display())]
pub struct ParseError {
    /// Offending file.
    pub path: PathBuf,
    /// Underlying read or parse message.
    pub message: String,
}

/// Errors produced by a formatter in a rendering pipeline.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The formatter received content of the wrong shape.
    #[error("{formatter} formatter expects {expected}, got {found}")]
    UnexpectedInput {
        /// Name of the rejecting formatter.
        formatter: &'static str,
        /// Description of the accepted input.
        expected: &'static str,
        /// Description of the received input.
        found: &'static str,
    },

    /// YAML serialization failed.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The pipeline finished without producing text.
    #[error("pipeline ended with a structured value instead of text")]
    NotText,
}

/// Failure of a single artifact during the artifact phase.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The artifact's pipeline could not render its value.
    #[error("cannot render {}: {source}", .target.display())]
    Render {
        /// Target path of the artifact.
        target: PathBuf,
        /// Formatter failure.
        source: FormatError,
    },

    /// The rendered content could not be written.
    #[error("cannot write {}: {source}", .target.display())]
    Write {
        /// Target path of the artifact.
        target: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while installing git hooks.
#[derive(Error, Debug)]
pub enum HookError {
    /// The hooks directory resolves outside of the project root.
    #[error("hooks directory {} escapes the project root", .dir.display())]
    OutsideProject {
        /// Requested hooks directory.
        dir: PathBuf,
    },

    /// The project root is not the top of a git working tree.
    #[error(".git can't be found in {}", .root.display())]
    NotARepository {
        /// Project root that was checked.
        root: PathBuf,
    },

    /// A hook was modified before the hooks directory was initialised.
    #[error("can't create hook, {} directory doesn't exist", .dir.display())]
    MissingDirectory {
        /// Hooks directory that does not exist.
        dir: PathBuf,
    },

    /// A filesystem operation on the hooks directory failed.
    #[error("hook I/O failed on {}: {source}", .path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Registering the hooks directory with git failed.
    #[error("git configuration failed: {0}")]
    Git(#[from] git2::Error),
}

/// Errors that arise from loading the project configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file named explicitly does not exist.
    #[error("config file {} not found", .path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected shape.
    #[error("Invalid TOML in {}: {source}", .path.display())]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser error.
        source: toml::de::Error,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ParseError / LookupError
    // -----------------------------------------------------------------------

    #[test]
    fn parse_error_names_path_and_message() {
        let e = ParseError {
            path: PathBuf::from("/pkg/package.json"),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "failed to extract JSON from /pkg/package.json (expected value at line 1 column 1)"
        );
    }

    #[test]
    fn lookup_error_wraps_parse_error_transparently() {
        let e: LookupError = ParseError {
            path: PathBuf::from("package.json"),
            message: "eof".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "failed to extract JSON from package.json (eof)");
    }

    #[test]
    fn lookup_error_missing_field_display() {
        let e = LookupError::MissingField {
            path: PathBuf::from("package.json"),
            field: "version",
        };
        assert_eq!(e.to_string(), "package.json has no string field 'version'");
    }

    // -----------------------------------------------------------------------
    // ArtifactError / DeployError
    // -----------------------------------------------------------------------

    #[test]
    fn artifacts_error_joins_every_failure() {
        let e = DeployError::Artifacts(vec![
            ArtifactError::Render {
                target: PathBuf::from(".eslintrc.yaml"),
                source: FormatError::NotText,
            },
            ArtifactError::Write {
                target: PathBuf::from(".prettierignore"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
        ]);
        let msg = e.to_string();
        assert!(msg.contains("cannot render .eslintrc.yaml"));
        assert!(msg.contains("cannot write .prettierignore: denied"));
        assert!(msg.contains("; "));
    }

    #[test]
    fn format_error_unexpected_input_display() {
        let e = FormatError::UnexpectedInput {
            formatter: "lines",
            expected: "a sequence of strings",
            found: "text",
        };
        assert_eq!(
            e.to_string(),
            "lines formatter expects a sequence of strings, got text"
        );
    }

    #[test]
    fn hook_error_not_a_repository_display() {
        let e = HookError::NotARepository {
            root: PathBuf::from("/project"),
        };
        assert_eq!(e.to_string(), ".git can't be found in /project");
    }

    #[test]
    fn hook_error_io_has_source() {
        use std::error::Error as StdError;
        let e = HookError::Io {
            path: PathBuf::from(".githooks/pre-commit"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn deploy_error_from_hook_error_is_transparent() {
        let e: DeployError = HookError::OutsideProject {
            dir: PathBuf::from("../hooks"),
        }
        .into();
        assert_eq!(e.to_string(), "hooks directory ../hooks escapes the project root");
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<DeployError>();
        assert_send_sync::<LookupError>();
        assert_send_sync::<ParseError>();
        assert_send_sync::<FormatError>();
        assert_send_sync::<ArtifactError>();
        assert_send_sync::<HookError>();
        assert_send_sync::<ConfigError>();
    }

    #[test]
    fn deploy_error_converts_to_anyhow() {
        let e = DeployError::Customization {
            registry: "hook",
            message: "boom".to_string(),
        };
        let anyhow_err: anyhow::Error = e.into();
        assert_eq!(
            anyhow_err.to_string(),
            "customization of the hook registry failed: boom"
        );
    }
}
