// file: src/selection/mod.rs
// version: 1.0.0
// guid: a8d0e05e-b199-4156-8b4d-da06a62bc094

//! Operator input validation for the VLAN and interface choices

pub mod range;
pub mod vlan;

pub use range::{parse_index_selection, resolve_selection, SelectionError};
pub use vlan::{choose_vlan, VlanChoiceError, DEFAULT_RESERVED_VLANS};
