// file: src/network/ssh.rs
// version: 2.1.0
// guid: 0dd3ba2c-07d4-4e93-9417-bc1da1f433b6

//! SSH session to a switch for running show commands

use super::session::{ConnectionParams, Credentials, DeviceSession};
use super::shell::CliShell;
use crate::error::VlanAssignError;
use crate::Result;
use ssh2::{Channel, ExtendedData, Session};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Output markers IOS prints instead of failing the command
const IOS_ERROR_MARKERS: &[&str] = &[
    "% Invalid input detected",
    "% Incomplete command",
    "% Ambiguous command",
];

/// Terminal geometry requested for the shell channel
const PTY_SIZE: (u32, u32, u32, u32) = (511, 24, 0, 0);

/// SSH session to a network device
///
/// All commands run through a single interactive shell channel.
pub struct SshSession {
    session: Option<Session>,
    shell: Option<CliShell<Channel>>,
    host: String,
}

impl SshSession {
    /// Open, handshake and password-authenticate a session, then start the shell
    pub fn connect(params: &ConnectionParams, credentials: &Credentials) -> Result<Self> {
        info!(
            "Connecting to {}:{} as {}",
            params.host, params.port, credentials.username
        );

        let addrs = resolve(&params.host, params.port)?;
        let tcp = connect_any(&addrs, params.timeout).map_err(|e| {
            VlanAssignError::session(format!("Failed to connect to {}: {}", params.host, e))
        })?;

        let mut session = Session::new().map_err(|e| {
            VlanAssignError::session(format!("Failed to create SSH session: {}", e))
        })?;

        session.set_tcp_stream(tcp);
        session.set_timeout(u32::try_from(params.timeout.as_millis()).unwrap_or(u32::MAX));
        session
            .handshake()
            .map_err(|e| VlanAssignError::session(format!("SSH handshake failed: {}", e)))?;

        session
            .userauth_password(&credentials.username, credentials.password())
            .map_err(|e| {
                VlanAssignError::authentication(format!(
                    "{} rejected credentials for {}: {}",
                    params.host, credentials.username, e
                ))
            })?;

        if !session.authenticated() {
            return Err(VlanAssignError::authentication(format!(
                "{} did not accept the session",
                params.host
            )));
        }

        let shell = CliShell::open(open_shell_channel(&session)?)?;

        info!("SSH connection established to {}", params.host);
        Ok(Self {
            session: Some(session),
            shell: Some(shell),
            host: params.host.clone(),
        })
    }
}

fn open_shell_channel(session: &Session) -> Result<Channel> {
    let mut channel = session.channel_session().map_err(|e| {
        VlanAssignError::session(format!("Failed to create SSH channel: {}", e))
    })?;

    // stderr shares the stream so neither side can fill the window unread
    channel
        .handle_extended_data(ExtendedData::Merge)
        .map_err(|e| VlanAssignError::session(format!("Failed to merge stderr: {}", e)))?;
    channel
        .request_pty("vt100", None, Some(PTY_SIZE))
        .map_err(|e| VlanAssignError::session(format!("PTY request failed: {}", e)))?;
    channel
        .shell()
        .map_err(|e| VlanAssignError::session(format!("Failed to start shell: {}", e)))?;
    Ok(channel)
}

fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| VlanAssignError::session(format!("Failed to resolve {}: {}", host, e)))?
        .collect();
    if addrs.is_empty() {
        return Err(VlanAssignError::session(format!("No address found for {}", host)));
    }
    Ok(addrs)
}

/// Try each address in turn; the last failure is reported when none answer
fn connect_any(addrs: &[SocketAddr], timeout: Duration) -> std::io::Result<TcpStream> {
    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!("Connection to {} failed: {}", addr, e);
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses to connect to")
    }))
}

/// Reject output that carries an IOS parser error banner
fn check_ios_output(command: &str, output: &str) -> Result<()> {
    match IOS_ERROR_MARKERS
        .iter()
        .find(|marker| output.contains(*marker))
    {
        Some(marker) => Err(VlanAssignError::command(command, marker.trim_start_matches("% "))),
        None => Ok(()),
    }
}

impl DeviceSession for SshSession {
    fn host(&self) -> &str {
        &self.host
    }

    fn send_command(&mut self, command: &str) -> Result<String> {
        debug!("Executing command: {}", command);

        let shell = self
            .shell
            .as_mut()
            .ok_or_else(|| VlanAssignError::session("No active SSH session"))?;
        let output = shell.send_command(command)?;
        check_ios_output(command, &output)?;

        debug!("Command returned {} bytes", output.len());
        Ok(output)
    }

    fn disconnect(&mut self) {
        if let Some(shell) = self.shell.take() {
            let mut channel = shell.into_inner();
            if let Err(e) = channel.close() {
                debug!("Shell channel to {} did not close cleanly: {}", self.host, e);
            }
        }
        if let Some(session) = self.session.take() {
            if let Err(e) = session.disconnect(None, "", None) {
                warn!("Failed to close session to {} cleanly: {}", self.host, e);
            }
            info!("SSH session to {} disconnected", self.host);
        }
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        self.disconnect();
    }
}
