//! `tracing`-backed implementation of the [`Log`] port.
use std::path::PathBuf;

use super::types::{Log, compose};
use super::utils::log_file_path;

/// Tracing target for per-item step lines.
pub const STEP_TARGET: &str = "js_rules::step";
/// Tracing target for the final result line.
pub const RESULT_TARGET: &str = "js_rules::result";

/// Which stream a [`Logger`] reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// One line per deployed artifact or hook.
    Step,
    /// The single success or failure line of a run.
    Result,
}

/// Emit one tracing event at `$level` on the target matching `$channel`.
///
/// Tracing targets must be constant, hence the match instead of a field.
macro_rules! emit {
    ($level:ident, $channel:expr, $line:expr) => {
        match $channel {
            Channel::Step => tracing::$level!(target: STEP_TARGET, "{}", $line),
            Channel::Result => tracing::$level!(target: RESULT_TARGET, "{}", $line),
        }
    };
}

/// Structured logger writing through the global `tracing` subscriber.
///
/// Console and file output are configured by
/// [`init_subscriber`](super::subscriber::init_subscriber); every event also
/// lands in `$XDG_CACHE_HOME/js-rules/<command>.log`.
#[derive(Debug, Clone)]
pub struct Logger {
    channel: Channel,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger on `channel` for the run of `command`.
    ///
    /// Only records the log file path; the file itself is opened by the
    /// subscriber's [`FileLayer`](super::subscriber::FileLayer).
    #[must_use]
    pub fn new(channel: Channel, command: &str) -> Self {
        Self {
            channel,
            log_file: log_file_path(command),
        }
    }

    /// Logger for step lines.
    #[must_use]
    pub fn step(command: &str) -> Self {
        Self::new(Channel::Step, command)
    }

    /// Logger for the result line.
    #[must_use]
    pub fn result(command: &str) -> Self {
        Self::new(Channel::Result, command)
    }

    /// Channel this logger reports on.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Path of the persistent log file, if the cache directory is usable.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

impl Log for Logger {
    fn info(&self, preamble: &str, msg: &str) {
        emit!(info, self.channel, compose(preamble, msg));
    }

    fn error(&self, preamble: &str, msg: &str) {
        emit!(error, self.channel, compose(preamble, msg));
    }

    fn debug(&self, preamble: &str, msg: &str) {
        emit!(debug, self.channel, compose(preamble, msg));
    }
}
