// File: src/logging.rs
//! Optional file logging for embedding hosts.
//!
//! User-facing failures go through the host message surface; the log is
//! diagnostics only.
use crate::context::AppContext;
use anyhow::Result;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::fs::File;

/// Initializes a `WriteLogger` targeting `devpub.log` under the cache
/// dir. Call at most once per process.
pub fn init(ctx: &dyn AppContext) -> Result<()> {
    let path = ctx
        .get_log_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log file path"))?;
    let file = File::create(&path)?;
    WriteLogger::init(LevelFilter::Debug, LogConfig::default(), file)?;
    log::debug!("Logging to {:?}", path);
    Ok(())
}
