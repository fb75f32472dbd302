// file: src/prompt/format.rs
// version: 1.0.0
// guid: 681a6a33-2982-4edb-8fd2-805d9b7de0f3

//! Text layout for operator-facing listings and notices

use crate::switch::Vlan;

/// Message underlined with dashes, preceded by a blank line
pub fn notice_text(message: &str) -> String {
    format!("\n{}\n{}", message, "-".repeat(message.chars().count()))
}

/// ` 1: item` lines for a 1-based pick list
pub fn numbered_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| format!(" {}: {}\n", idx + 1, item.as_ref()))
        .collect()
}

/// ` - <id>, <name>` lines with the id padded to four columns
pub fn vlan_listing(vlans: &[Vlan]) -> String {
    vlans
        .iter()
        .map(|vlan| format!(" - {:4}, {}\n", vlan.id, vlan.name))
        .collect()
}
