//! Tracing subscriber setup
//!
//! The interactive UI owns the terminal, so it logs to a file. Everything
//! else logs to stderr.

use anyhow::{anyhow, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

fn level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Log to stderr
pub fn init_stderr(debug: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level(debug))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Log to a file, creating its directory if needed
pub fn init_file(path: &Path, debug: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create log directory {}: {}", parent.display(), e))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("Failed to open log file {}: {}", path.display(), e))?;

    tracing_subscriber::fmt()
        .with_max_level(level(debug))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
