// file: src/cli/args.rs
// version: 2.0.0
// guid: b3e7f902-58a1-4d6c-9f24-0c8e6d1a7b35

//! Command line argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "vlan-assign")]
#[command(about = "Pick an access VLAN and free ports on a Cisco IOS switch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Answer commands from bundled sample output instead of a live switch
    #[arg(long)]
    pub sample: bool,

    /// Device hostname; the confirmation prompt is still shown
    #[arg(long)]
    pub host: Option<String>,

    /// SSH username
    #[arg(short, long)]
    pub username: Option<String>,

    /// SSH port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Connect and I/O timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    #[arg(long, help = "Directory searched for TextFSM templates before the built-in ones")]
    pub templates: Option<String>,

    #[arg(short, long, help = "Configuration file applied after the standard locations")]
    pub config: Option<PathBuf>,

    /// Do not clear the screen on start
    #[arg(long)]
    pub no_clear: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}
