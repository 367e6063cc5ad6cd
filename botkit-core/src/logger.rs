//! Tracing setup for the bot process and for one-shot CLI calls.
//!
//! The caller describes the output with [`LogOptions`]; `RUST_LOG` still wins over the
//! configured default filter.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Console stream the fmt layer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Stdout,
    /// Keeps stdout free for command output (`botkit call` prints JSON there).
    Stderr,
}

/// What [`init_tracing`] installs.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter used when `RUST_LOG` is unset, e.g. `info` or `command_router=debug,info`.
    pub default_filter: String,
    pub console: Console,
    /// Log file appended to alongside the console; parent directories are created.
    pub file: Option<PathBuf>,
    /// Emit an event when an instrumented span (a dispatch, an API call) closes, with its timing.
    pub span_events: bool,
    /// Useful when updates are dispatched concurrently.
    pub thread_ids: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            console: Console::Stdout,
            file: None,
            span_events: true,
            thread_ids: false,
        }
    }
}

impl LogOptions {
    /// Quiet stderr-only logging for one-shot commands.
    pub fn stderr(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            console: Console::Stderr,
            span_events: false,
            ..Self::default()
        }
    }

    fn filter(&self) -> anyhow::Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.default_filter)
                .map_err(|e| anyhow::anyhow!("invalid log filter {:?}: {}", self.default_filter, e)),
        }
    }

    fn writer(&self) -> anyhow::Result<BoxMakeWriter> {
        let file = self.file.as_deref().map(open_log_file).transpose()?;
        Ok(match (self.console, file) {
            (Console::Stdout, Some(file)) => BoxMakeWriter::new(io::stdout.and(file)),
            (Console::Stderr, Some(file)) => BoxMakeWriter::new(io::stderr.and(file)),
            (Console::Stdout, None) => BoxMakeWriter::new(io::stdout),
            (Console::Stderr, None) => BoxMakeWriter::new(io::stderr),
        })
    }
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> anyhow::Result<Arc<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Arc::new(file))
}

/// Installs the global tracing subscriber described by `options`. Load `.env` before calling
/// this so `RUST_LOG` from it is honored.
pub fn init_tracing(options: &LogOptions) -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(options.writer()?)
        .with_span_events(if options.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        })
        .with_thread_ids(options.thread_ids)
        .with_ansi(options.file.is_none())
        .with_target(true);

    Registry::default()
        .with(options.filter()?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing already initialized: {}", e))
}
