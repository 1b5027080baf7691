//! Configuration management for taigalist
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    API_PREFIX, APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECONDS,
    LOCAL_CONFIG_FILE_NAME, PAGE_SIZE, PAGE_SIZE_MAX, TIMEOUT_SECONDS_MAX,
};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub paging: PagingConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the Taiga instance, without the API prefix
    pub url: String,
    /// Path prefix of the REST API
    pub api_prefix: String,
    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
}

/// Paging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Items per page; a shorter page marks the end of a list
    pub page_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to file
    pub enabled: bool,
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep the login and selected project between runs
    pub persist: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            api_prefix: API_PREFIX.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self { page_size: PAGE_SIZE }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { persist: true }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.server.url)
            .with_context(|| format!("Invalid server url '{}'", self.server.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("server url must use http or https, got '{}'", url.scheme());
        }

        if !self.server.api_prefix.starts_with('/') {
            anyhow::bail!("api_prefix must start with '/', got '{}'", self.server.api_prefix);
        }

        if self.server.timeout_seconds == 0 || self.server.timeout_seconds > TIMEOUT_SECONDS_MAX {
            anyhow::bail!(
                "timeout_seconds must be between 1 and {}, got {}",
                TIMEOUT_SECONDS_MAX,
                self.server.timeout_seconds
            );
        }

        if self.paging.page_size == 0 || self.paging.page_size > PAGE_SIZE_MAX {
            anyhow::bail!(
                "page_size must be between 1 and {}, got {}",
                PAGE_SIZE_MAX,
                self.paging.page_size
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# taigalist Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::TAIGA_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        log::info!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }
}
