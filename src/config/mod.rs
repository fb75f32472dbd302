// file: src/config/mod.rs
// version: 2.0.0
// guid: 9f41b401-3de7-44f0-9349-2ddd98676537

//! Configuration module for the VLAN assignment tool
//!
//! Settings come from built-in defaults, optional TOML files and environment
//! overrides; see [`loader::ConfigLoader`] for the layering order.

pub mod loader;

pub use loader::ConfigLoader;

use crate::error::VlanAssignError;
use crate::network::session::SUPPORTED_DEVICE_TYPES;
use crate::network::ConnectionParams;
use crate::selection::DEFAULT_RESERVED_VLANS;
use crate::switch::EligibilityRules;
use crate::textfsm::{SHOW_INTERFACES_STATUS_TEMPLATE, SHOW_VLAN_TEMPLATE};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub templates: TemplateConfig,
    pub selection: SelectionConfig,
}

/// How the device is reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// SSH port on the device
    pub port: u16,
    /// Connect and I/O timeout in seconds
    pub timeout_seconds: u64,
    /// Platform the commands and templates target
    pub device_type: String,
}

/// Where TextFSM templates are looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory searched before the built-in templates; `~` is expanded
    pub directory: Option<String>,
    /// File name of the `show vlan` template
    pub vlan: String,
    /// File name of the `show interface status` template
    pub interface_status: String,
}

/// Limits on what the operator may pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// VLAN ids that may never be chosen
    pub reserved_vlans: Vec<u16>,
    /// Port name prefixes that are never offered
    pub excluded_port_prefixes: Vec<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            port: 22,
            timeout_seconds: 10,
            device_type: "cisco_ios".to_string(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            directory: Some("templates".to_string()),
            vlan: SHOW_VLAN_TEMPLATE.to_string(),
            interface_status: SHOW_INTERFACES_STATUS_TEMPLATE.to_string(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            reserved_vlans: DEFAULT_RESERVED_VLANS.to_vec(),
            excluded_port_prefixes: EligibilityRules::default().excluded_prefixes,
        }
    }
}

impl AppConfig {
    /// Check values that would only fail later, mid-session
    pub fn validate(&self) -> Result<()> {
        if self.connection.port == 0 {
            return Err(VlanAssignError::config("connection.port must be non-zero"));
        }
        if self.connection.timeout_seconds == 0 {
            return Err(VlanAssignError::config(
                "connection.timeout_seconds must be non-zero",
            ));
        }
        if !SUPPORTED_DEVICE_TYPES.contains(&self.connection.device_type.as_str()) {
            return Err(VlanAssignError::config(format!(
                "connection.device_type '{}' is not supported (supported: {})",
                self.connection.device_type,
                SUPPORTED_DEVICE_TYPES.join(", ")
            )));
        }
        if self.templates.vlan.trim().is_empty() || self.templates.interface_status.trim().is_empty() {
            return Err(VlanAssignError::config("template file names cannot be blank"));
        }
        Ok(())
    }

    /// Template directory with `~` and environment variables expanded
    pub fn template_dir(&self) -> Option<PathBuf> {
        self.templates.directory.as_deref().map(|dir| {
            shellexpand::full(dir)
                .map(|expanded| PathBuf::from(expanded.into_owned()))
                .unwrap_or_else(|_| PathBuf::from(shellexpand::tilde(dir).into_owned()))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.connection.timeout_seconds)
    }

    pub fn connection_params(&self, host: &str) -> ConnectionParams {
        ConnectionParams {
            host: host.to_string(),
            port: self.connection.port,
            timeout: self.timeout(),
            device_type: self.connection.device_type.clone(),
        }
    }

    pub fn eligibility_rules(&self) -> EligibilityRules {
        EligibilityRules::new(self.selection.excluded_port_prefixes.clone())
    }
}
