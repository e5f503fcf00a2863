//! Git hook installation.
//!
//! Hooks live in a project-relative directory (default `.githooks`) that git
//! is pointed at through `core.hooksPath`.  Each hook script sources a shared
//! runner from `<dir>/_/runner.sh` which handles skipping and error
//! reporting.
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::HookError;
use crate::operations::FileSystemOps;

/// Default hooks directory, relative to the project root.
pub const DEFAULT_HOOKS_DIR: &str = ".githooks";

/// Environment variable that disables every hook when set to `0`.
pub const SKIP_ENV: &str = "JS_RULES_HOOKS";

/// Shared runner sourced by every hook script.
pub const RUNNER_SCRIPT: &str = r#"#!/usr/bin/env sh
if [ -z "$js_rules_skip_init" ]; then
  debug () {
    if [ "$JS_RULES_DEBUG" = "1" ]; then
      echo "js-rules (debug) - $1"
    fi
  }

  readonly hook_name="$(basename -- "$0")"
  debug "starting $hook_name..."

  if [ "$JS_RULES_HOOKS" = "0" ]; then
    debug "JS_RULES_HOOKS env variable is set to 0, skipping hook"
    exit 0
  fi

  readonly js_rules_skip_init=1
  export js_rules_skip_init
  sh -e "$0" "$@"
  exit_code="$?"

  if [ $exit_code != 0 ]; then
    echo "js-rules - $hook_name hook exited with code $exit_code (error)"
  fi

  exit $exit_code
fi
"#;

/// Operations needed to install hooks, in the order the engine calls them.
#[cfg_attr(test, mockall::automock)]
pub trait HookInstaller: Send + Sync {
    /// Prepare the hooks directory and register it with git.  Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] if the directory is outside the project, the
    /// project is not a repository, or any write fails.
    fn init(&self) -> Result<(), HookError>;

    /// Create or reset hook `name` with `content` after the script preamble.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] if the hooks directory is missing or the write
    /// fails.
    fn set(&self, name: &str, content: &str) -> Result<(), HookError>;

    /// Append `command` as a new line of hook `name`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] if the hooks directory is missing or the write
    /// fails.
    fn add(&self, name: &str, command: &str) -> Result<(), HookError>;
}

/// [`HookInstaller`] writing shell scripts through [`FileSystemOps`].
#[derive(Debug, Clone)]
pub struct GitHookInstaller {
    root: PathBuf,
    dir: PathBuf,
    fs: Arc<dyn FileSystemOps>,
    register: bool,
}

impl GitHookInstaller {
    /// Installer for hooks in `dir` (relative to `root`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, dir: impl Into<PathBuf>, fs: Arc<dyn FileSystemOps>) -> Self {
        Self {
            root: root.into(),
            dir: dir.into(),
            fs,
            register: true,
        }
    }

    /// Skip setting `core.hooksPath` during [`init`](HookInstaller::init).
    #[must_use]
    pub const fn without_git_config(mut self) -> Self {
        self.register = false;
        self
    }

    /// Absolute path of the hooks directory.
    #[must_use]
    pub fn hooks_path(&self) -> PathBuf {
        self.root.join(&self.dir)
    }

    fn hook_path(&self, name: &str) -> PathBuf {
        self.hooks_path().join(name)
    }

    fn ensure_dir(&self) -> Result<(), HookError> {
        let dir = self.hooks_path();
        if self.fs.exists(&dir) {
            Ok(())
        } else {
            Err(HookError::MissingDirectory { dir })
        }
    }

    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> HookError + '_ {
        move |source| HookError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl HookInstaller for GitHookInstaller {
    fn init(&self) -> Result<(), HookError> {
        let relative = normalize_inside(&self.root, &self.dir).ok_or_else(|| {
            HookError::OutsideProject {
                dir: self.dir.clone(),
            }
        })?;
        if !self.fs.exists(&self.root.join(".git")) {
            return Err(HookError::NotARepository {
                root: self.root.clone(),
            });
        }

        let internal = self.hooks_path().join("_");
        self.fs
            .create_dir_all(&internal)
            .map_err(Self::io(&internal))?;
        let ignore = internal.join(".gitignore");
        self.fs.write_file(&ignore, "*\n").map_err(Self::io(&ignore))?;
        let runner = internal.join("runner.sh");
        self.fs
            .write_file(&runner, RUNNER_SCRIPT)
            .map_err(Self::io(&runner))?;
        self.fs.set_executable(&runner).map_err(Self::io(&runner))?;

        if self.register {
            crate::git::set_hooks_path(&self.root, &slash_path(&relative))?;
        }
        Ok(())
    }

    fn set(&self, name: &str, content: &str) -> Result<(), HookError> {
        self.ensure_dir()?;
        let path = self.hook_path(name);
        self.fs
            .write_file(&path, &script(content))
            .map_err(Self::io(&path))?;
        self.fs.set_executable(&path).map_err(Self::io(&path))
    }

    fn add(&self, name: &str, command: &str) -> Result<(), HookError> {
        let path = self.hook_path(name);
        if !self.fs.exists(&path) {
            return self.set(name, command);
        }
        self.fs
            .append_file(&path, &format!("{command}\n"))
            .map_err(Self::io(&path))
    }
}

/// Full hook script for `content`.
#[must_use]
pub fn script(content: &str) -> String {
    format!("#!/usr/bin/env sh\n. \"$(dirname -- \"$0\")/_/runner.sh\"\n\n{content}\n")
}

/// Lexically resolve `dir` against `root`, returning the path relative to
/// `root`, or `None` if it leaves `root`.
fn normalize_inside(root: &Path, dir: &Path) -> Option<PathBuf> {
    let relative = if dir.is_absolute() {
        dir.strip_prefix(root).ok()?
    } else {
        dir
    };
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.iter().collect())
}

fn slash_path(path: &Path) -> String {
    let joined = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
