//! In-memory logger for embedders and tests.
use std::sync::Mutex;

use super::types::{Level, Log, LogEntry};

/// Records every `(preamble, message)` pair it receives.
///
/// Entries can be inspected with [`entries`](Self::entries) or forwarded to
/// another [`Log`] with [`replay`](Self::replay), in the order received.
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<LogEntry>>,
    with_debug: bool,
}

impl BufferedLog {
    /// Create an empty log that ignores debug messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log that also records debug messages.
    #[must_use]
    pub fn with_debug() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            with_debug: true,
        }
    }

    /// Snapshot of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map_or_else(|p| p.into_inner().clone(), |g| g.clone())
    }

    /// Recorded entries rendered as single lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries().iter().map(LogEntry::line).collect()
    }

    /// The most recent entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<LogEntry> {
        self.entries().pop()
    }

    /// Forward every recorded entry to `target`.
    pub fn replay(&self, target: &dyn Log) {
        for entry in self.entries() {
            match entry.level {
                Level::Debug => target.debug(&entry.preamble, &entry.message),
                Level::Info => target.info(&entry.preamble, &entry.message),
                Level::Error => target.error(&entry.preamble, &entry.message),
            }
        }
    }

    fn push(&self, level: Level, preamble: &str, msg: &str) {
        let entry = LogEntry {
            level,
            preamble: preamble.to_string(),
            message: msg.to_string(),
        };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

impl Log for BufferedLog {
    fn info(&self, preamble: &str, msg: &str) {
        self.push(Level::Info, preamble, msg);
    }

    fn error(&self, preamble: &str, msg: &str) {
        self.push(Level::Error, preamble, msg);
    }

    fn debug(&self, preamble: &str, msg: &str) {
        if self.with_debug {
            self.push(Level::Debug, preamble, msg);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::{Channel, isolated_logger};
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn records_in_order() {
        let log = BufferedLog::new();
        log.info("p:", "a deployed");
        log.error("p:", "installation failed: boom");
        assert_eq!(
            log.lines(),
            vec!["p: a deployed", "p: installation failed: boom"]
        );
        assert_eq!(log.last().unwrap().level, Level::Error);
    }

    #[test]
    fn debug_ignored_by_default() {
        let log = BufferedLog::new();
        log.debug("", "hidden");
        assert!(log.entries().is_empty());

        let verbose = BufferedLog::with_debug();
        verbose.debug("", "shown");
        assert_eq!(verbose.lines(), vec!["shown"]);
    }

    #[test]
    fn replay_forwards_to_another_log() {
        let source = BufferedLog::with_debug();
        source.info("p:", "one");
        source.debug("p:", "two");
        source.error("p:", "three");
        let sink = BufferedLog::with_debug();
        source.replay(&sink);
        assert_eq!(sink.entries(), source.entries());
    }

    #[test]
    fn replay_into_logger_reaches_file() {
        let (logger, _tmp, _guard) = isolated_logger(Channel::Result);
        let buf = BufferedLog::new();
        let marker = format!("buf-marker-{}", std::process::id());
        buf.info("", &marker);
        let path = logger.log_path().expect("log path");
        let before = fs::read_to_string(path).unwrap();
        assert!(!before.contains(&marker), "nothing written before replay");
        buf.replay(&logger);
        let after = fs::read_to_string(path).unwrap();
        assert!(after.contains(&marker), "replayed entry should be in the file");
    }

    #[test]
    fn concurrent_writers_lose_nothing() {
        let log = Arc::new(BufferedLog::new());
        std::thread::scope(|s| {
            for i in 0..8 {
                let log = Arc::clone(&log);
                s.spawn(move || log.info("", &format!("line {i}")));
            }
        });
        assert_eq!(log.entries().len(), 8);
    }
}
