//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use super::logger::{RESULT_TARGET, STEP_TARGET};
use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] appending every event to the persistent
/// log file, timestamped and with ANSI codes stripped.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command`, write a run header, and open it
    /// for appending.
    ///
    /// Returns `None` if the cache directory or the file is unusable.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version = option_env!("JS_RULES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        let header = format!(
            "==========================================\n\
             js-rules {version} {command} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => format!("[{ts}] [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}] [warn] {msg}"),
            (tracing::Level::DEBUG | tracing::Level::TRACE, _) => format!("[{ts}] [debug] {msg}"),
            (_, RESULT_TARGET) => format!("[{ts}] ==> {msg}"),
            _ => format!("[{ts}] {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// Console [`FormatEvent`](tracing_subscriber::fmt::FormatEvent): indented
/// step lines, a bold result line, coloured errors.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            (tracing::Level::WARN, _) => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            (tracing::Level::INFO, RESULT_TARGET) => writeln!(writer, "\x1b[1;32m{msg}\x1b[0m"),
            (tracing::Level::INFO, STEP_TARGET) => writeln!(writer, "  {msg}"),
            (tracing::Level::INFO, _) => writeln!(writer, "{msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stdout for info and below and to stderr for warn
/// and error; debug is shown only when `verbose`.  The file layer writes every
/// event (debug included) to `$XDG_CACHE_HOME/js-rules/<command>.log`.
/// `RUST_LOG` overrides the console level when set.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_filter);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .ok();
}
