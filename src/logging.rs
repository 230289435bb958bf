//! Tracing subscriber setup
//!
//! CLI runs log to stderr. The TUI owns the terminal, so it logs to
//! `<data_local_dir>/cinescope/cinescope.log` instead; if that file cannot be
//! opened, logging is skipped.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "cinescope=info";

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Log file used by the TUI
pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("cinescope").join("cinescope.log"))
}

fn env_filter(quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("cinescope=error")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    })
}

/// Install the global subscriber; later calls are no-ops
pub fn init(target: LogTarget, quiet: bool) {
    let filter = env_filter(quiet);
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .try_init();
        }
        LogTarget::File => {
            let Some(path) = log_file_path() else {
                return;
            };
            if let Some(parent) = path.parent() {
                if std::fs::create_dir_all(parent).is_err() {
                    return;
                }
            }
            let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
                return;
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_under_app_dir() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("cinescope/cinescope.log"));
        }
    }
}
