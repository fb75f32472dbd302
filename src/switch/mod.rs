// file: src/switch/mod.rs
// version: 1.0.0
// guid: db239914-4216-4037-b09a-c3719cd9717a

//! Switch data: collection over a session, eligibility filtering, config preview

pub mod collect;
pub mod filter;
pub mod models;
pub mod render;

pub use collect::{collect_interfaces, collect_vlans, SHOW_INTERFACE_STATUS, SHOW_VLAN};
pub use filter::{eligible_interfaces, natural_cmp, EligibilityRules};
pub use models::{InterfaceStatus, Selection, Vlan};
pub use render::render_access_config;
