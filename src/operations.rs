//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the deployment engine can be
//! unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::io;
use std::path::Path;

/// Abstraction over the filesystem primitives the engine relies on.
///
/// Every write is a whole-file operation: callers never observe a partially
/// written file through this trait.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Replace the content of `path` with `contents`, creating the file if
    /// needed.  Parent directories are not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Append `contents` to the end of the existing file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be written.
    fn append_file(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Create `path` and all missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Mark `path` as executable (`0o755`).  No-op on non-Unix platforms.
    ///
    /// # Errors
    ///
    /// Returns an error if the permissions cannot be read or changed.
    fn set_executable(&self, path: &Path) -> io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn append_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        use std::io::Write as _;
        let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
        file.write_all(contents.as_bytes())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn set_executable(&self, path: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(path, perms)?;
        }
        #[cfg(not(unix))]
        let _ = path;
        Ok(())
    }
}

/// In-memory [`FileSystemOps`] for unit tests.
///
/// Files live in a map keyed by path; directories are tracked separately so
/// that `exists` answers for both.  Paths registered with
/// [`failing_on`](Self::failing_on) reject every write with
/// `PermissionDenied`.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    files: std::sync::Mutex<std::collections::BTreeMap<std::path::PathBuf, String>>,
    dirs: std::sync::Mutex<std::collections::BTreeSet<std::path::PathBuf>>,
    executables: std::sync::Mutex<std::collections::BTreeSet<std::path::PathBuf>>,
    failing: Vec<std::path::PathBuf>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dirs.lock().expect("mock dirs poisoned").insert(path.into());
        self
    }

    /// Make every write to `path` fail.
    #[must_use]
    pub fn failing_on(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.failing.push(path.into());
        self
    }

    /// Current content of `path`, if it has been written.
    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("mock files poisoned").get(path).cloned()
    }

    /// All written file paths in sorted order.
    #[must_use]
    pub fn written_paths(&self) -> Vec<std::path::PathBuf> {
        self.files
            .lock()
            .expect("mock files poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Returns `true` if `path` was marked executable.
    #[must_use]
    pub fn is_executable(&self, path: &Path) -> bool {
        self.executables
            .lock()
            .expect("mock executables poisoned")
            .contains(path)
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.failing.iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("mock: write denied for {}", path.display()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("mock files poisoned").contains_key(path)
            || self.dirs.lock().expect("mock dirs poisoned").contains(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.check(path)?;
        self.files
            .lock()
            .expect("mock files poisoned")
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.check(path)?;
        let mut files = self.files.lock().expect("mock files poisoned");
        let existing = files
            .get_mut(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        existing.push_str(contents);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        let mut dirs = self.dirs.lock().expect("mock dirs poisoned");
        for ancestor in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn set_executable(&self, path: &Path) -> io::Result<()> {
        if !self.exists(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        self.executables
            .lock()
            .expect("mock executables poisoned")
            .insert(path.to_path_buf());
        Ok(())
    }
}
