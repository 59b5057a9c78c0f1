// 📜 Logging via tracing
//
// RUST_LOG wins over `log.filter`. With `log.file` set, output is appended to
// that file; otherwise it goes to stderr.

use crate::config::LogConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

/// Where log lines should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Write to stderr unless a log file is configured
    Stderr,

    /// The terminal owns stdout/stderr: log only to the configured file
    FileOnly,
}

/// Install the global subscriber. Returns `false` when logging stays off.
pub fn init(cfg: &LogConfig, target: LogTarget) -> Result<bool> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match (&cfg.file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;

            fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, LogTarget::Stderr) => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        (None, LogTarget::FileOnly) => return Ok(false),
    }

    tracing::info!(filter = %cfg.filter, "Logger initialized");
    Ok(true)
}
