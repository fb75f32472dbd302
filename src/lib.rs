// file: src/lib.rs
// version: 2.1.0
// guid: 3d9a6e21-47bf-4c08-92e5-b1f0c7d85a36

//! # vlan-assign
//!
//! Interactive access-VLAN assignment for Cisco IOS switches. The tool logs in
//! over SSH, runs `show vlan` and `show interface status`, parses both with
//! TextFSM templates and walks the operator through picking a VLAN and a set
//! of unused ports.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod prompt;
pub mod selection;
pub mod switch;
pub mod textfsm;
pub mod wizard;

pub use error::{Result, VlanAssignError};
