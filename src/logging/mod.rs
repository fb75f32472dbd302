// file: src/logging/mod.rs
// version: 2.0.0
// guid: 2f5b7d0e-93c1-4b8a-a6e4-71d0c5f8e913

//! Logging system for the VLAN assignment tool

pub mod logger;

pub use logger::{init_logger, with_operation_span};
