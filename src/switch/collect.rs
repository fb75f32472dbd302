// file: src/switch/collect.rs
// version: 1.0.0
// guid: 8e23f35e-a8d3-4b0f-8534-34d008f1f117

//! Runs the show commands and turns their output into models

use super::models::{InterfaceStatus, Vlan};
use crate::network::DeviceSession;
use crate::textfsm::{ParsedTable, Template};
use crate::Result;
use std::collections::BTreeMap;
use tracing::debug;

pub const SHOW_VLAN: &str = "show vlan";
pub const SHOW_INTERFACE_STATUS: &str = "show interface status";

/// Run a command and parse its output with the given template
pub fn run_parsed(
    session: &mut dyn DeviceSession,
    command: &str,
    template: &Template,
) -> Result<ParsedTable> {
    debug!("Running {} on {}", command, session.host());
    let raw = session.send_command(command)?;
    debug!("{} returned {} line(s)", command, raw.lines().count());
    template.parse_text(&raw)
}

/// VLANs on the device, one per id, sorted by id
pub fn collect_vlans(session: &mut dyn DeviceSession, template: &Template) -> Result<Vec<Vlan>> {
    let table = run_parsed(session, SHOW_VLAN, template)?;
    Ok(vlans_from_table(&table))
}

pub fn vlans_from_table(table: &ParsedTable) -> Vec<Vlan> {
    let by_id: BTreeMap<u16, Vlan> = table
        .records()
        .filter_map(|record| Vlan::from_record(&record))
        .map(|vlan| (vlan.id, vlan))
        .collect();
    by_id.into_values().collect()
}

/// Interface status rows in device order
pub fn collect_interfaces(
    session: &mut dyn DeviceSession,
    template: &Template,
) -> Result<Vec<InterfaceStatus>> {
    let table = run_parsed(session, SHOW_INTERFACE_STATUS, template)?;
    Ok(table
        .records()
        .filter_map(|record| InterfaceStatus::from_record(&record))
        .collect())
}
