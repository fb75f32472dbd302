// file: src/network/session.rs
// version: 1.0.0
// guid: 88d15350-fbe1-4ff4-8f16-2accd978c2af

//! Device session abstraction shared by the live and sample backends

use super::{SampleSession, SshSession};
use crate::error::VlanAssignError;
use crate::Result;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Device platforms the command set and templates are written for
pub const SUPPORTED_DEVICE_TYPES: &[&str] = &["cisco_ios"];

/// Login credentials collected from the operator
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and how to reach the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
    pub device_type: String,
}

impl ConnectionParams {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            timeout: Duration::from_secs(10),
            device_type: "cisco_ios".to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(VlanAssignError::validation("Device hostname cannot be blank"));
        }
        if self.port == 0 {
            return Err(VlanAssignError::validation("SSH port must be non-zero"));
        }
        if self.timeout.is_zero() {
            return Err(VlanAssignError::validation("Connection timeout must be non-zero"));
        }
        if !SUPPORTED_DEVICE_TYPES.contains(&self.device_type.as_str()) {
            return Err(VlanAssignError::validation(format!(
                "Unsupported device type '{}' (supported: {})",
                self.device_type,
                SUPPORTED_DEVICE_TYPES.join(", ")
            )));
        }
        Ok(())
    }
}

/// Which backend serves device commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Live,
    Sample,
}

/// An open session that can run show commands on a device
pub trait DeviceSession: Send {
    /// Hostname the session is attached to
    fn host(&self) -> &str;

    /// Run a command and return its raw output
    fn send_command(&mut self, command: &str) -> Result<String>;

    fn disconnect(&mut self) {}
}

/// Open a session with the selected backend
pub fn connect(
    mode: SessionMode,
    params: &ConnectionParams,
    credentials: &Credentials,
) -> Result<Box<dyn DeviceSession>> {
    params.validate()?;

    let session: Box<dyn DeviceSession> = match mode {
        SessionMode::Live => Box::new(SshSession::connect(params, credentials)?),
        SessionMode::Sample => {
            info!("Using bundled sample output for {}", params.host);
            Box::new(SampleSession::new(&params.host))
        }
    };
    Ok(session)
}
