//! Project configuration file (`js-rules.toml`).
//!
//! ```toml
//! edit_warning = "custom banner"
//!
//! [artifacts]
//! skip = [".prettierignore"]
//!
//! [hooks]
//! skip = ["pre-push"]
//!
//! [hooks.commands]
//! commit-msg = ["npx --no-install commitlint --edit \"$1\""]
//! ```
pub mod toml_loader;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default file name, looked up in the project root.
pub const FILE_NAME: &str = "js-rules.toml";

/// Parsed project configuration.  Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Replacement for the generated-file banner.
    pub edit_warning: Option<String>,
    /// Artifact registry adjustments.
    pub artifacts: ArtifactSection,
    /// Hook registry adjustments.
    pub hooks: HookSection,
}

/// `[artifacts]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactSection {
    /// Target paths not to deploy.
    pub skip: Vec<PathBuf>,
}

/// `[hooks]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookSection {
    /// Hook names not to install.
    pub skip: Vec<String>,
    /// Hooks to add or replace, in name order.
    pub commands: BTreeMap<String, Vec<String>>,
}

impl ProjectConfig {
    /// Load the configuration at `path`.  A missing file yields the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// Load a configuration file the user named explicitly, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if there is no file at `path`, or any
    /// error of [`load`](Self::load).
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Self::load(path)
    }

    /// Returns `true` when the configuration changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load(&dir.path().join(FILE_NAME)).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn required_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo.toml");
        let err = ProjectConfig::load_required(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("typo.toml"), "{err}");

        std::fs::write(&path, "edit_warning = \"x\"\n").unwrap();
        let config = ProjectConfig::load_required(&path).unwrap();
        assert_eq!(config.edit_warning.as_deref(), Some("x"));
    }

    #[test]
    fn full_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(
            &path,
            r#"
edit_warning = "custom banner"

[artifacts]
skip = [".prettierignore"]

[hooks]
skip = ["pre-push"]

[hooks.commands]
commit-msg = ["npx --no-install commitlint --edit \"$1\""]
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.edit_warning.as_deref(), Some("custom banner"));
        assert_eq!(config.artifacts.skip, vec![PathBuf::from(".prettierignore")]);
        assert_eq!(config.hooks.skip, vec!["pre-push".to_string()]);
        assert_eq!(
            config.hooks.commands.get("commit-msg").unwrap(),
            &vec![r#"npx --no-install commitlint --edit "$1""#.to_string()]
        );
        assert!(!config.is_empty());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, "[artifacts]\nskipp = []\n").unwrap();
        assert!(matches!(
            ProjectConfig::load(&path),
            Err(ConfigError::InvalidSyntax { .. })
        ));
    }
}
