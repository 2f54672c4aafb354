//! Tracing subscriber setup.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to stderr; `RUST_LOG` overrides `default_filter`.
pub fn init_stderr(default_filter: &str) {
    // Don't panic if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to `path` so output does not interfere with the TUI.
pub fn init_file(default_filter: &str, path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_filter))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
