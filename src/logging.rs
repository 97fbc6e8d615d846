// 📝 Logging - tracing subscriber setup for every binary

use crate::config::LogConfig;
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Plain commands and the server write to stderr
    Stderr,
    /// The terminal UI owns the screen: file only, otherwise discarded
    Terminal,
}

/// Install the global subscriber. RUST_LOG wins over `config.filter`.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .with_context(|| format!("Invalid log filter \"{}\"", config.filter))?,
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match (&config.file, target) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        (None, LogTarget::Terminal) => builder.with_writer(std::io::sink).try_init(),
        (None, LogTarget::Stderr) => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}
