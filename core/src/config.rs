//! Configuration management for nscon.
//!
//! Stores settings in YAML format at `~/.nscon/config.yaml`. Every field has a
//! default, so a partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};
use crate::util::{expand_home, write_atomic};

/// Directory under the home directory holding config and inventory.
pub const BASE_DIR_NAME: &str = ".nscon";

const CONFIG_FILE_NAME: &str = "config.yaml";
const INVENTORY_FILE_NAME: &str = "namespaces.yaml";

/// Immutable run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the namespace inventory file.
    #[serde(default)]
    pub inventory_location: PathBuf,

    /// Maximum number of projects scanned at the same time.
    #[serde(default = "default_scan_concurrency")]
    pub scan_concurrency: usize,

    /// Only scan gcloud configurations whose account contains this text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_filter: Option<String>,

    /// Timeout for a single gcloud/kubectl invocation, in seconds.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// How many times the operator may answer the location prompt.
    #[serde(default = "default_prompt_attempts")]
    pub prompt_attempts: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcloud_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubectl_path: Option<PathBuf>,
}

fn default_scan_concurrency() -> usize {
    8
}

fn default_command_timeout() -> u64 {
    60
}

fn default_prompt_attempts() -> u32 {
    3
}

impl Settings {
    /// Default settings keeping the inventory in `base_dir`.
    pub fn with_base_dir(base_dir: &Path) -> Self {
        Self {
            inventory_location: base_dir.join(INVENTORY_FILE_NAME),
            scan_concurrency: default_scan_concurrency(),
            account_filter: None,
            command_timeout_secs: default_command_timeout(),
            prompt_attempts: default_prompt_attempts(),
            gcloud_path: None,
            kubectl_path: None,
        }
    }

    /// Fill in values that depend on the config location and normalize paths.
    fn resolve(mut self, base_dir: &Path) -> Self {
        if self.inventory_location.as_os_str().is_empty() {
            self.inventory_location = base_dir.join(INVENTORY_FILE_NAME);
        }
        self.inventory_location = expand_home(&self.inventory_location);
        self.gcloud_path = self.gcloud_path.as_deref().map(expand_home);
        self.kubectl_path = self.kubectl_path.as_deref().map(expand_home);
        self.scan_concurrency = self.scan_concurrency.max(1);
        self.prompt_attempts = self.prompt_attempts.max(1);
        self
    }
}

/// Returns `~/.nscon`.
pub fn base_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(BASE_DIR_NAME))
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
}

/// Configuration store for nscon settings.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.nscon/config.yaml`
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: base_dir()?.join(CONFIG_FILE_NAME),
        })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory holding the config file; the default inventory lives next to it.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Load settings from disk.
    ///
    /// Returns default settings if the file doesn't exist.
    pub async fn load(&self) -> Result<Settings> {
        let base_dir = self.config_dir();
        if !self.config_path.exists() {
            return Ok(Settings::with_base_dir(&base_dir));
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(Settings::with_base_dir(&base_dir));
        }

        let settings: Settings = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(settings.resolve(&base_dir))
    }

    /// Save settings to disk, creating the config directory if needed.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        let content = serde_yaml::to_string(settings)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        write_atomic(&self.config_path, &content).await
    }

    /// Load settings, writing defaults and an empty inventory on first use.
    ///
    /// The returned flag is true when the configuration was just created.
    pub async fn load_or_init(&self) -> Result<(Settings, bool)> {
        if self.config_path.exists() {
            return Ok((self.load().await?, false));
        }

        let settings = Settings::with_base_dir(&self.config_dir());
        self.save(&settings).await?;

        if !settings.inventory_location.exists() {
            write_atomic(&settings.inventory_location, "").await?;
        }

        tracing::info!(path = %self.config_path.display(), "initialised configuration");
        Ok((settings, true))
    }
}
