//! File-backed `tracing` setup.
//!
//! The terminal belongs to the UI, so log lines can only go to a file.
//! Nothing is installed unless `AUTHFORM_LOG_FILE` is set; the filter is
//! read from `AUTHFORM_LOG` (same syntax as `RUST_LOG`, default `info`).

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_ENV: &str = "AUTHFORM_LOG_FILE";
pub const LOG_FILTER_ENV: &str = "AUTHFORM_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
    pub filter: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            file: std::env::var(LOG_FILE_ENV).ok().map(PathBuf::from),
            filter: std::env::var(LOG_FILTER_ENV).unwrap_or_else(|_| "info".to_string()),
        }
    }
}

pub fn init_logging(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path:?}"))?;
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter `{}`", config.filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_no_subscriber() {
        let cfg = LogConfig {
            file: None,
            filter: "not a [valid filter".into(),
        };
        assert!(init_logging(&cfg).is_ok());
    }
}
