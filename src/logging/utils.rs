//! Utility functions for path resolution, ANSI stripping, and time formatting.
use std::fs;
use std::path::PathBuf;

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range).
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            for inner in chars.by_ref() {
                if ('@'..='~').contains(&inner) {
                    break;
                }
            }
        }
    }
    out
}

/// Return `$XDG_CACHE_HOME/js-rules/` (or `~/.cache/js-rules/`), creating it
/// if needed.
pub(super) fn cache_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CACHE_HOME").map_or_else(
        || {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    let dir = base.join("js-rules");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path for `command` under the cache directory.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(cache_dir()?.join(format!("{command}.log")))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31mERROR\x1b[0m hello"), "ERROR hello");
        assert_eq!(strip_ansi("no codes here"), "no codes here");
        assert_eq!(
            strip_ansi("\x1b[1;32mjs-rules[1.0.0]: successfully deployed\x1b[0m"),
            "js-rules[1.0.0]: successfully deployed"
        );
    }

    #[test]
    fn strip_ansi_handles_csi_sequences() {
        assert_eq!(strip_ansi("\x1b[2Jhello"), "hello");
        assert_eq!(strip_ansi("\x1b[Kworld"), "world");
        assert_eq!(strip_ansi("\x1bMtext"), "text");
    }

    #[test]
    fn strip_ansi_empty_string() {
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn log_file_path_lives_in_tool_cache_dir() {
        let _lock = crate::logging::TEST_ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let tmp = tempfile::tempdir().unwrap();
        // SAFETY: Protected by TEST_ENV_MUTEX; restored before the lock drops.
        #[allow(unsafe_code)]
        unsafe {
            std::env::set_var("XDG_CACHE_HOME", tmp.path());
        }
        let path = log_file_path("install");
        #[allow(unsafe_code)]
        unsafe {
            std::env::remove_var("XDG_CACHE_HOME");
        }
        assert_eq!(path, Some(tmp.path().join("js-rules").join("install.log")));
        assert!(tmp.path().join("js-rules").is_dir());
    }

    #[test]
    fn format_utc_time_has_correct_format() {
        let s = format_utc_time();
        assert_eq!(s.len(), 8, "HH:MM:SS should be 8 chars");
        assert_eq!(&s[2..3], ":");
        assert_eq!(&s[5..6], ":");
    }

    #[test]
    fn format_utc_datetime_has_correct_format() {
        let s = format_utc_datetime();
        assert_eq!(s.len(), 19, "YYYY-MM-DD HH:MM:SS should be 19 chars");
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
    }
}
