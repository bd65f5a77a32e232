//! Tracing subscriber setup.
//!
//! Filter priority: `INSTANCE_EXPLORER_LOG`, then `RUST_LOG`, then the
//! `--verbose` flag (`debug`), else `warn`. The TUI owns the terminal, so
//! interactive runs log to a file in the cache directory instead of stderr.

use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "INSTANCE_EXPLORER_LOG";
pub const LOG_FILE: &str = "instance-explorer.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn build_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    std::env::var(LOG_ENV)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Install the global subscriber. Called once, early in `main`. A log file
/// that can't be opened disables logging rather than failing the run.
pub fn init(target: LogTarget, verbose: bool, cache_dir: Option<&Path>) {
    let filter = build_filter(verbose);

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
        LogTarget::File => {
            let Some(dir) = cache_dir else { return };
            if std::fs::create_dir_all(dir).is_err() {
                return;
            }
            let file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE))
            {
                Ok(f) => f,
                Err(_) => return,
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
    }
}
