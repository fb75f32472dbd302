// file: src/network/mod.rs
// version: 2.1.0
// guid: a3b29046-96e6-443a-b59f-e79c5b1dfd45

//! Device sessions: live SSH shell and bundled sample output

pub mod sample;
pub mod session;
pub mod shell;
pub mod ssh;

pub use sample::SampleSession;
pub use session::{connect, ConnectionParams, Credentials, DeviceSession, SessionMode};
pub use shell::CliShell;
pub use ssh::SshSession;
