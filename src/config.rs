//! Application configuration, read from a TOML file.
//!
//! Every field has a default so a missing file or a partial file is fine.

use crate::catalog::LoadOptions;
use crate::view::Tab;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Load-time validation strictness
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Fail when an evolution label names no catalog entry
    #[serde(default)]
    pub strict_links: bool,

    /// Fail when a category has no color mapping
    #[serde(default)]
    pub strict_colors: bool,
}

impl From<&CatalogConfig> for LoadOptions {
    fn from(config: &CatalogConfig) -> Self {
        LoadOptions {
            strict_links: config.strict_links,
            strict_colors: config.strict_colors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tab shown on startup
    #[serde(default)]
    pub start_tab: Tab,

    /// Rows skipped by PgUp/PgDn
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_tab: Tab::default(),
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize { 5 }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Log destination while the terminal UI owns the screen
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}

fn default_log_filter() -> String { "pokedex=info".to_string() }

impl AppConfig {
    /// Read `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::from(&self.catalog)
    }
}
