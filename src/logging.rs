//! Log sinks for the orange console.
//!
//! One-shot runs keep stdout for results and log to stderr. The interactive
//! session owns both stdout and stdin, so its logs go to a file instead.

use crate::error::{OrangeError, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

const LOG_FILE_NAME: &str = "orange.log";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Truncated at startup.
    File(PathBuf),
}

impl LogSink {
    /// Picks the sink for a run: stderr for one-shot batches, the default log
    /// file for the interactive session.
    pub fn for_run(one_shot: bool) -> Self {
        if one_shot {
            Self::Stderr
        } else {
            Self::File(default_log_file())
        }
    }

    /// The file backing this sink, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stderr => None,
            Self::File(path) => Some(path),
        }
    }
}

/// `<state dir>/orange/orange.log`, falling back to the config dir and then
/// the temp dir on platforms without one.
pub fn default_log_file() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("orange").join(LOG_FILE_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| OrangeError::io(format!("{}: {e}", parent.display())))?;
    }
    File::create(path).map_err(|e| OrangeError::io(format!("{}: {e}", path.display())))
}

/// Installs the global subscriber for `sink`.
///
/// A file sink that cannot be opened is reported as `Io` and no subscriber is
/// installed; the caller decides whether to continue without logs.
pub fn init(sink: &LogSink) -> Result<()> {
    let filter = filter_from(std::env::var("RUST_LOG").ok().as_deref());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File(path) => builder
            .with_writer(open_log_file(path)?)
            .with_ansi(false)
            .try_init(),
    }
    .map_err(|e| OrangeError::internal(format!("Logging already initialized: {e}")))
}
