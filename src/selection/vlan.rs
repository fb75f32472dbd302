// file: src/selection/vlan.rs
// version: 1.0.0
// guid: 12bfca2a-e3a9-4229-a808-b7102bce19c9

//! Validation of the operator's VLAN choice

use crate::switch::Vlan;
use thiserror::Error;

/// VLANs IOS reserves for the default VLAN and legacy FDDI/Token Ring
pub const DEFAULT_RESERVED_VLANS: &[u16] = &[1, 1002, 1003, 1004, 1005];

/// Why a VLAN answer was refused; the message is shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlanChoiceError {
    #[error("Please enter an integer value")]
    NotInteger,

    #[error("Please choose a different VLAN ID")]
    Reserved(u16),

    #[error("Please enter a VLAN ID from the list.")]
    NotListed(i64),
}

/// Resolve an answer against the VLANs listed on the device
pub fn choose_vlan(input: &str, vlans: &[Vlan], reserved: &[u16]) -> Result<Vlan, VlanChoiceError> {
    let id: i64 = input
        .trim()
        .parse()
        .map_err(|_| VlanChoiceError::NotInteger)?;

    if let Ok(id) = u16::try_from(id) {
        if reserved.contains(&id) {
            return Err(VlanChoiceError::Reserved(id));
        }
    }

    vlans
        .iter()
        .find(|vlan| i64::from(vlan.id) == id)
        .cloned()
        .ok_or(VlanChoiceError::NotListed(id))
}
