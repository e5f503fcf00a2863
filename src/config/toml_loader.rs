//! TOML file loading with typed errors.
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Deserialize the TOML file at `path`.
///
/// A missing file deserializes as an empty document, so `T` must accept
/// empty input (typically via `#[serde(default)]`).
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
/// [`ConfigError::InvalidSyntax`] if it is not valid TOML for `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&content).map_err(|source| ConfigError::InvalidSyntax {
        path: path.to_path_buf(),
        source,
    })
}
