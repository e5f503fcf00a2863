//! Resolution of the tool's own name and version.
//!
//! The identity feeds two strings used throughout a run: the log preamble
//! (`name[version]:`) and the edit warning written into every generated file.
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{LookupError, ParseError};

/// Name and version of the tool performing the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
}

impl PackageIdentity {
    /// Create an identity from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Prefix for every log line of a run.
    #[must_use]
    pub fn log_preamble(&self) -> String {
        format!("{}[{}]:", self.name, self.version)
    }

    /// Banner text injected into generated files.
    #[must_use]
    pub fn edit_warning(&self) -> String {
        format!("DO NOT EDIT THIS FILE AS IT IS GENERATED BY {}", self.name)
    }
}

/// Source of the tool identity, queried once per install.
pub trait IdentitySource: Send + Sync + std::fmt::Debug {
    /// Resolve the identity.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the identity cannot be determined.
    fn resolve(&self) -> Result<PackageIdentity, LookupError>;
}

/// Identity compiled into this binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinIdentity;

impl IdentitySource for BuiltinIdentity {
    fn resolve(&self) -> Result<PackageIdentity, LookupError> {
        let version = option_env!("JS_RULES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        Ok(PackageIdentity::new(env!("CARGO_PKG_NAME"), version))
    }
}

/// Fixed identity, for embedders and tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity(pub PackageIdentity);

impl IdentitySource for StaticIdentity {
    fn resolve(&self) -> Result<PackageIdentity, LookupError> {
        Ok(self.0.clone())
    }
}

/// Identity read from the nearest JSON manifest above a directory.
#[derive(Debug, Clone)]
pub struct ManifestIdentity {
    start: PathBuf,
    file_name: String,
}

impl ManifestIdentity {
    /// Search for `package.json` from `start` upwards.
    #[must_use]
    pub fn package_json(start: impl Into<PathBuf>) -> Self {
        Self::new(start, "package.json")
    }

    /// Search for `file_name` from `start` upwards.
    #[must_use]
    pub fn new(start: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            file_name: file_name.into(),
        }
    }
}

impl IdentitySource for ManifestIdentity {
    fn resolve(&self) -> Result<PackageIdentity, LookupError> {
        let path = find_up(&self.start, &self.file_name).ok_or_else(|| {
            LookupError::ManifestNotFound {
                start: self.start.clone(),
                file_name: self.file_name.clone(),
            }
        })?;
        let manifest = read_json_file(&path)?;
        let field = |key: &'static str| {
            manifest
                .get(key)
                .and_then(Value::as_str)
                .map(String::from)
                .ok_or_else(|| LookupError::MissingField {
                    path: path.clone(),
                    field: key,
                })
        };
        Ok(PackageIdentity::new(field("name")?, field("version")?))
    }
}

/// Return the first `dir/file_name` that is a file, walking from `start` to
/// the filesystem root.
#[must_use]
pub fn find_up(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// Read and parse a JSON file.
///
/// # Errors
///
/// Returns [`ParseError`] naming `path` if the file cannot be read or is not
/// valid JSON.
pub fn read_json_file(path: &Path) -> Result<Value, ParseError> {
    let wrap = |message: String| ParseError {
        path: path.to_path_buf(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| wrap(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| wrap(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn preamble_and_warning_format() {
        let id = PackageIdentity::new("js-rules", "1.2.3");
        assert_eq!(id.log_preamble(), "js-rules[1.2.3]:");
        assert_eq!(
            id.edit_warning(),
            "DO NOT EDIT THIS FILE AS IT IS GENERATED BY js-rules"
        );
    }

    #[test]
    fn builtin_identity_uses_crate_name() {
        let id = BuiltinIdentity.resolve().unwrap();
        assert_eq!(id.name, "js-rules");
        assert!(!id.version.is_empty());
    }

    #[test]
    fn manifest_identity_found_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "@scope/pkg", "version": "4.5.6"}"#,
        )
        .unwrap();
        let nested = dir.path().join("src").join("lib");
        std::fs::create_dir_all(&nested).unwrap();

        let id = ManifestIdentity::package_json(&nested).resolve().unwrap();
        assert_eq!(id, PackageIdentity::new("@scope/pkg", "4.5.6"));
    }

    #[test]
    fn manifest_identity_prefers_nearest_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "outer", "version": "1.0.0"}"#,
        )
        .unwrap();
        let inner = dir.path().join("inner");
        std::fs::create_dir(&inner).unwrap();
        std::fs::write(
            inner.join("package.json"),
            r#"{"name": "inner", "version": "2.0.0"}"#,
        )
        .unwrap();

        let id = ManifestIdentity::package_json(&inner).resolve().unwrap();
        assert_eq!(id.name, "inner");
    }

    #[test]
    fn manifest_identity_reports_parse_failure_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ManifestIdentity::package_json(dir.path())
            .resolve()
            .unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)), "got {err:?}");
        let msg = err.to_string();
        assert!(msg.starts_with("failed to extract JSON from "), "{msg}");
        assert!(msg.contains(&path.display().to_string()), "{msg}");
    }

    #[test]
    fn manifest_identity_requires_version() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name": "x"}"#).unwrap();
        let err = ManifestIdentity::package_json(dir.path())
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::MissingField {
                field: "version",
                ..
            }
        ));
    }

    #[test]
    fn manifest_identity_custom_file_name_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestIdentity::new(dir.path(), "js-rules-manifest-that-does-not-exist.json")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, LookupError::ManifestNotFound { .. }));
    }

    #[test]
    fn read_json_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = read_json_file(&path).unwrap_err();
        assert_eq!(err.path, path);
    }
}
