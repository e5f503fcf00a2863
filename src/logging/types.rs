//! Core logging types: severity, recorded entries, and the [`Log`] trait.

/// Severity of a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Diagnostic detail, hidden on the console unless verbose.
    Debug,
    /// Normal progress or outcome.
    Info,
    /// Failure.
    Error,
}

/// A single `(preamble, message)` pair as received by a [`Log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity the message was logged at.
    pub level: Level,
    /// Run prefix, typically `name[version]:`.  May be empty.
    pub preamble: String,
    /// Message body.
    pub message: String,
}

impl LogEntry {
    /// Render the entry as a single line: `preamble message`, or just the
    /// message when the preamble is empty.
    #[must_use]
    pub fn line(&self) -> String {
        compose(&self.preamble, &self.message)
    }
}

/// Join a preamble and a message with a single space.
#[must_use]
pub fn compose(preamble: &str, message: &str) -> String {
    if preamble.is_empty() {
        message.to_string()
    } else {
        format!("{preamble} {message}")
    }
}

/// Sink for deployment step and result messages.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`;
/// [`BufferedLog`](super::buffered::BufferedLog) keeps entries in memory so
/// embedders and tests can inspect them.
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log an informational message.
    fn info(&self, preamble: &str, msg: &str);
    /// Log an error message.
    fn error(&self, preamble: &str, msg: &str);
    /// Log a debug message.  Dropped unless the implementation opts in.
    fn debug(&self, preamble: &str, msg: &str) {
        let _ = (preamble, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_skips_empty_preamble() {
        assert_eq!(compose("", "installation failed"), "installation failed");
        assert_eq!(
            compose("js-rules[1.0.0]:", "successfully deployed"),
            "js-rules[1.0.0]: successfully deployed"
        );
    }

    #[test]
    fn entry_line_uses_compose() {
        let entry = LogEntry {
            level: Level::Info,
            preamble: "p:".to_string(),
            message: ".eslintrc.yaml deployed".to_string(),
        };
        assert_eq!(entry.line(), "p: .eslintrc.yaml deployed");
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Error);
    }
}
