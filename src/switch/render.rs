// file: src/switch/render.rs
// version: 1.0.0
// guid: 70ff107c-13db-4da5-8ec1-60ee5f5ed658

//! IOS configuration preview for the chosen access ports

use super::models::Selection;

/// Interface stanzas that would put every selected port into the access VLAN
pub fn render_access_config(selection: &Selection) -> String {
    let mut config = String::new();
    for port in &selection.interfaces {
        config.push_str(&format!("interface {}\n", port));
        config.push_str(" switchport mode access\n");
        config.push_str(&format!(" switchport access vlan {}\n", selection.vlan.id));
    }
    config
}
