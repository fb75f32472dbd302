// file: src/cli/mod.rs
// version: 2.0.0
// guid: 6a1d3e85-c4f2-4b97-8e06-d25b9a7c1f40

//! Command line interface for the VLAN assignment tool

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
