// file: src/error.rs
// version: 1.0.0
// guid: 9089163a-7e08-412a-aadd-ada37d48975c

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, VlanAssignError>;

/// Error types for the VLAN assignment tool
#[derive(Error, Debug)]
pub enum VlanAssignError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("TOML error: {0}")]
    Serialization(#[from] toml::de::Error),

    #[error("Interrupted: {0}")]
    Interrupted(String),
}

impl VlanAssignError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Create a new authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a new command error
    pub fn command(command: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            message: msg.into(),
        }
    }

    /// Create a new template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a new interrupted error
    pub fn interrupted(msg: impl Into<String>) -> Self {
        Self::Interrupted(msg.into())
    }

    /// Whether the error came from opening or authenticating the device session
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Session(_) | Self::Authentication(_))
    }
}
