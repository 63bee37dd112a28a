//! `tracing` subscriber setup.
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it only logs
//! when a log file is configured.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::DashboardConfig;
use crate::error::{AppError, ErrorKind};

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The configured log file, or nowhere.
    FileOnly,
}

/// Install the global subscriber. Repeated calls are ignored.
pub fn init(config: &DashboardConfig, target: LogTarget) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

    let writer = match (target, config.log_file.as_deref()) {
        (_, Some(path)) => file_writer(path)?,
        (LogTarget::Stderr, None) => BoxMakeWriter::new(io::stderr),
        (LogTarget::FileOnly, None) => BoxMakeWriter::new(io::sink),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(matches!(target, LogTarget::Stderr) && config.log_file.is_none())
        .with_target(false)
        .try_init();
    Ok(())
}

fn default_directive(level: &str) -> String {
    format!("silver_dashboard={level}")
}

fn file_writer(path: &Path) -> Result<BoxMakeWriter, AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            AppError::new(
                ErrorKind::Config,
                format!("Failed to open log file '{}': {e}", path.display()),
            )
        })?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}
