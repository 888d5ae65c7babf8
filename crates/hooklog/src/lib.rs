//! Per-hook rotating log files, wired into `tracing`.
//!
//! Each hook process logs to `hooks/logs/<hook>.log` as structured JSON.
//! Files rotate on size (`<hook>.log` → `.1` → `.2` → …) with a bounded
//! retention.  Stdout belongs to the hook wire protocol, so the subscriber
//! never writes there, and every logging failure is swallowed — a broken log
//! file must not change a hook's exit code.

mod rotate;

pub use rotate::RotatingFile;

use std::io;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::EnvFilter;

use tl_domain::config::LoggingConfig;

/// Cloneable handle over the shared rotating file.
#[derive(Clone)]
pub struct LogWriter {
    inner: Arc<Mutex<RotatingFile>>,
}

impl LogWriter {
    pub fn new(file: RotatingFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }
}

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install the global subscriber for one hook process.
///
/// Safe to call once per process; a second call is a no-op (`try_init`).
pub fn init(hook: &str, log_dir: &Path, config: &LoggingConfig) {
    // Best-effort: a missing/unwritable log directory disables logging, it
    // never fails the hook.
    let _ = std::fs::create_dir_all(log_dir);

    let path = log_dir.join(format!("{hook}.log"));
    let writer = LogWriter::new(RotatingFile::new(path, config.max_bytes, config.retention));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .json()
        .try_init();
}

/// Record the raw event payload a hook received on stdin.
pub fn log_input(payload: &serde_json::Value) {
    tracing::debug!(payload = %payload, "hook input");
}

/// Record the response a hook wrote to stdout (empty string = no output).
pub fn log_output(response: &str) {
    tracing::debug!(response = %response, "hook output");
}
