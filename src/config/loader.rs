// file: src/config/loader.rs
// version: 2.0.0
// guid: fa6c8b96-2c4d-497a-b847-d643cef886d1

//! Layered configuration loading
//!
//! Later layers win: defaults, user file, project file, explicit `--config`
//! file, then `VLAN_ASSIGN_*` environment variables. Files may be partial;
//! tables are merged key by key.

use super::AppConfig;
use crate::error::VlanAssignError;
use crate::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Project-local configuration file name
pub const PROJECT_CONFIG_FILE: &str = ".vlan-assign.toml";

pub const ENV_PORT: &str = "VLAN_ASSIGN_PORT";
pub const ENV_TIMEOUT: &str = "VLAN_ASSIGN_TIMEOUT";
pub const ENV_TEMPLATES: &str = "VLAN_ASSIGN_TEMPLATES";

/// Configuration loader with file layering and environment overrides
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_config: Option<PathBuf>,
    project_config: Option<PathBuf>,
    explicit_config: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader using the standard user and project locations
    pub fn new() -> Self {
        Self {
            user_config: Self::user_config_path(),
            project_config: Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            explicit_config: None,
        }
    }

    /// Loader that only reads the given files
    pub fn empty() -> Self {
        Self {
            user_config: None,
            project_config: None,
            explicit_config: None,
        }
    }

    pub fn with_user_config(mut self, path: Option<PathBuf>) -> Self {
        self.user_config = path;
        self
    }

    pub fn with_project_config(mut self, path: Option<PathBuf>) -> Self {
        self.project_config = path;
        self
    }

    /// A file that must exist and is applied after the standard locations
    pub fn with_explicit_config(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_config = path;
        self
    }

    /// Get the user configuration file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vlan-assign").join("config.toml"))
    }

    /// Load configuration from every layer, reading the process environment
    pub async fn load(&self) -> Result<AppConfig> {
        self.load_with_env(|key| std::env::var(key).ok()).await
    }

    /// Load configuration with a custom environment lookup
    pub async fn load_with_env<F>(&self, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut merged = match toml::Value::try_from(AppConfig::default()) {
            Ok(toml::Value::Table(table)) => table,
            Ok(_) => {
                return Err(VlanAssignError::config(
                    "Default configuration did not encode as a table",
                ))
            }
            Err(e) => {
                return Err(VlanAssignError::config(format!(
                    "Failed to encode default configuration: {}",
                    e
                )))
            }
        };

        for path in [&self.user_config, &self.project_config].into_iter().flatten() {
            if path.is_file() {
                info!("Loading configuration from: {}", path.display());
                merge_tables(&mut merged, Self::read_table(path).await?);
            } else {
                debug!("No configuration at {}", path.display());
            }
        }

        if let Some(path) = &self.explicit_config {
            info!("Loading configuration from: {}", path.display());
            merge_tables(&mut merged, Self::read_table(path).await?);
        }

        let config: AppConfig = toml::Value::Table(merged).try_into()?;
        let config = apply_env_overrides(config, lookup);
        config.validate()?;

        debug!("Final configuration: {:#?}", config);
        Ok(config)
    }

    async fn read_table(path: &Path) -> Result<toml::Table> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            VlanAssignError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            VlanAssignError::config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge `overlay` into `base`, recursing into nested tables
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Apply environment variable overrides
fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.connection.port = port,
            Err(_) => warn!("Ignoring {}={}: not a port number", ENV_PORT, port),
        }
    }

    if let Some(timeout) = lookup(ENV_TIMEOUT) {
        match timeout.trim().parse::<u64>() {
            Ok(seconds) => config.connection.timeout_seconds = seconds,
            Err(_) => warn!("Ignoring {}={}: not a number of seconds", ENV_TIMEOUT, timeout),
        }
    }

    if let Some(dir) = lookup(ENV_TEMPLATES) {
        if !dir.trim().is_empty() {
            config.templates.directory = Some(dir);
        }
    }

    config
}
