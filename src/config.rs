// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

/// Splits a comma-separated label string into trimmed tags.
/// Empty fragments (stray commas, blank input) are dropped.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Ordered tag set used to query and group the explorer tree.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Bearer credential for the publish endpoint.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_true")]
    pub show_explorer: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            api_key: String::new(),
            // Match the serde default
            show_explorer: true,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can behave accordingly.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable. Settings reads are a pass-through; a user with
    /// no config simply has no tags and no credential yet.
    pub fn load_or_default(ctx: &dyn AppContext) -> Self {
        Self::load(ctx).unwrap_or_default()
    }

    /// Load for a read-modify-write cycle. A missing file yields defaults,
    /// but any other failure (unreadable or corrupt file) is an error: the
    /// caller must abort rather than save defaults over stored settings.
    pub fn load_for_update(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config
    /// file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    // --- Tag set operations (set semantics, insertion order preserved) ---

    /// Merges a comma-separated label input into the configured set,
    /// skipping labels already present.
    pub fn add_tags(&mut self, input: &str) {
        for tag in split_tags(input) {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }

    /// Removes the listed labels from the configured set.
    pub fn remove_tags(&mut self, remove: &[String]) {
        self.tags.retain(|t| !remove.contains(t));
    }
}
