// file: src/network/sample.rs
// version: 1.0.0
// guid: 438a0629-1ac8-4993-8afc-d9ab1ea241ba

//! Offline session that answers with captured switch output

use super::session::DeviceSession;
use crate::error::VlanAssignError;
use crate::Result;
use tracing::debug;

/// Captured `show vlan` output from an access switch
pub const SAMPLE_SHOW_VLAN: &str = include_str!("../../samples/show_vlan.txt");
/// Captured `show interface status` output from an access switch
pub const SAMPLE_SHOW_INTERFACES_STATUS: &str =
    include_str!("../../samples/show_interfaces_status.txt");

/// Session backed by bundled sample output instead of a device
#[derive(Debug, Clone)]
pub struct SampleSession {
    host: String,
}

impl SampleSession {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

fn normalize(command: &str) -> String {
    command
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl DeviceSession for SampleSession {
    fn host(&self) -> &str {
        &self.host
    }

    fn send_command(&mut self, command: &str) -> Result<String> {
        debug!("Sample session answering '{}'", command);
        match normalize(command).as_str() {
            "show vlan" => Ok(SAMPLE_SHOW_VLAN.to_string()),
            "show interface status" | "show interfaces status" => {
                Ok(SAMPLE_SHOW_INTERFACES_STATUS.to_string())
            }
            _ => Err(VlanAssignError::command(
                command,
                "no sample output recorded for this command",
            )),
        }
    }
}
