// file: src/switch/models.rs
// version: 1.0.0
// guid: 225ca4c3-ae81-4512-9377-493b92b8a79d

//! Rows scraped from the switch and the operator's final choice

use crate::textfsm::Record;
use std::fmt;
use tracing::debug;

/// Columns read from the `show vlan` template
pub mod vlan_columns {
    pub const VLAN_ID: &str = "VLAN_ID";
    pub const NAME: &str = "NAME";
}

/// Columns read from the `show interface status` template
pub mod interface_columns {
    pub const PORT: &str = "PORT";
    pub const NAME: &str = "NAME";
    pub const STATUS: &str = "STATUS";
}

/// Highest VLAN id IOS accepts
pub const MAX_VLAN_ID: u16 = 4094;

/// A VLAN defined on the switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vlan {
    pub id: u16,
    pub name: String,
}

impl Vlan {
    pub fn new(id: u16, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Build from a parsed row, skipping rows whose id is not a VLAN number
    pub fn from_record(record: &Record<'_>) -> Option<Self> {
        let raw_id = record.text(vlan_columns::VLAN_ID).trim();
        match raw_id.parse::<u16>() {
            Ok(id) if (1..=MAX_VLAN_ID).contains(&id) => {
                Some(Self::new(id, record.text(vlan_columns::NAME).trim()))
            }
            _ => {
                debug!("Skipping row with VLAN id '{}'", raw_id);
                None
            }
        }
    }
}

impl fmt::Display for Vlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}

/// One row of `show interface status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceStatus {
    pub port: String,
    pub description: String,
    pub status: String,
}

impl InterfaceStatus {
    pub fn new(
        port: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            port: port.into(),
            description: description.into(),
            status: status.into(),
        }
    }

    pub fn from_record(record: &Record<'_>) -> Option<Self> {
        let port = record.text(interface_columns::PORT).trim();
        if port.is_empty() {
            return None;
        }
        Some(Self::new(
            port,
            record.text(interface_columns::NAME).trim(),
            record.text(interface_columns::STATUS).trim(),
        ))
    }
}

/// VLAN and access ports picked by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub vlan: Vlan,
    pub interfaces: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textfsm::Template;

    #[test]
    fn test_vlan_from_record_rejects_out_of_range_ids() {
        // Arrange
        let template = Template::parse(
            "Value VLAN_ID (\\d+)\nValue NAME (\\S+)\n\nStart\n  ^${VLAN_ID} ${NAME} -> Record\n",
        )
        .unwrap();
        let table = template.parse_text("10 users\n0 bogus\n5000 huge\n").unwrap();

        // Act
        let vlans: Vec<Vlan> = table.records().filter_map(|r| Vlan::from_record(&r)).collect();

        // Assert
        assert_eq!(vlans, vec![Vlan::new(10, "users")]);
    }

    #[test]
    fn test_interface_from_record_trims_fields() {
        let template = Template::parse(
            "Value PORT (\\S+)\nValue NAME (.*?)\nValue STATUS (\\S+)\n\nStart\n  ^${PORT}\\|${NAME}\\|${STATUS}$$ -> Record\n",
        )
        .unwrap();
        let table = template.parse_text("Gi1/0/1| desk |notconnect\n").unwrap();

        let row = table
            .records()
            .find_map(|r| InterfaceStatus::from_record(&r))
            .unwrap();

        assert_eq!(row, InterfaceStatus::new("Gi1/0/1", "desk", "notconnect"));
    }

    #[test]
    fn test_vlan_display() {
        assert_eq!(Vlan::new(20, "VOICE").to_string(), "20 (VOICE)");
    }
}
