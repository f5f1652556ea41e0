//! Diagnostic logging setup.
//!
//! The chat TUI owns stdout and stderr while it runs, so interactive
//! sessions log to a file or not at all. One-shot subcommands log to stderr.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_FILTER_ENV: &str = "IOTRIX_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

impl LogTarget {
    /// Where an interactive session should log.
    pub fn for_tui(log_file: Option<PathBuf>) -> Self {
        log_file.map(LogTarget::File).unwrap_or(LogTarget::Discard)
    }

    /// Where a one-shot command should log.
    pub fn for_command(log_file: Option<PathBuf>) -> Self {
        log_file.map(LogTarget::File).unwrap_or(LogTarget::Stderr)
    }
}

pub fn init_tracing(target: LogTarget) -> Result<(), Box<dyn Error>> {
    let filter = build_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Discard => {}
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| err as Box<dyn Error>)?,
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err as Box<dyn Error>)?;
        }
    }
    Ok(())
}

fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
