//! Tracing setup
//!
//! The TUI owns the terminal, so interactive runs log to a file; one-shot runs
//! log to stderr. Filtering follows `RUST_LOG`, defaulting to `info`.

use directories::ProjectDirs;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that can occur while setting up logging
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file or its directory could not be created
    #[error("Cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A global subscriber was already installed
    #[error("Logging already initialised")]
    AlreadyInitialised,
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// No usable location; logging is off
    Disabled,
}

impl LogTarget {
    /// File target for interactive runs: `explicit`, else the platform cache dir
    pub fn for_tui(explicit: Option<PathBuf>) -> Self {
        explicit
            .or_else(default_log_path)
            .map(LogTarget::File)
            .unwrap_or(LogTarget::Disabled)
    }
}

/// `resultboard.log` in the XDG cache directory (`~/.cache/resultboard/` on Linux)
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "resultboard")?;
    Some(project_dirs.cache_dir().join("resultboard.log"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> Result<fs::File, LogError> {
    let open_err = |source| LogError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(open_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)
}

/// Installs the global subscriber for `target`
pub fn init(target: &LogTarget) -> Result<(), LogError> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    let installed = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|_| LogError::AlreadyInitialised)
}
