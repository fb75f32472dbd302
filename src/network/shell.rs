// file: src/network/shell.rs
// version: 1.0.0
// guid: 61c0e7b4-2a9f-4d83-8e15-f7b3a0d92c46

//! Prompt-driven command exchange over one interactive CLI stream
//!
//! IOS drops the SSH transport once an exec channel closes, so every command
//! goes through the same shell: write the command, then read until the
//! device prompt shows up again.

use crate::error::VlanAssignError;
use crate::Result;
use std::io::{ErrorKind, Read, Write};
use tracing::{debug, trace};

/// Command that turns off `--More--` paging on IOS
pub const DISABLE_PAGING: &str = "terminal length 0";

/// Upper bound on buffered output for a single command
const MAX_OUTPUT_BYTES: usize = 8 * 1024 * 1024;

/// Interactive CLI session over any byte stream
pub struct CliShell<S> {
    stream: S,
    prompt: String,
}

impl<S: Read + Write> CliShell<S> {
    /// Wait for the first prompt, then disable paging
    pub fn open(stream: S) -> Result<Self> {
        let mut shell = Self {
            stream,
            prompt: String::new(),
        };

        shell.write_line("")?;
        let banner = shell.read_until(|buffer| detect_prompt(buffer).is_some())?;
        shell.prompt = detect_prompt(&banner)
            .ok_or_else(|| VlanAssignError::session("Device prompt not found"))?;
        debug!("Device prompt: {}", shell.prompt);

        shell.send_command(DISABLE_PAGING)?;
        Ok(shell)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Run a command and return its output without the echo and trailing prompt
    pub fn send_command(&mut self, command: &str) -> Result<String> {
        self.write_line(command)?;
        let prompt = self.prompt.clone();
        let raw = self.read_until(|buffer| ends_with_prompt(buffer, &prompt))?;
        Ok(strip_echo_and_prompt(&raw, command, &prompt))
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        trace!("Sending '{}'", line);
        self.stream
            .write_all(format!("{}\n", line).as_bytes())
            .and_then(|_| self.stream.flush())
            .map_err(|e| VlanAssignError::session(format!("Failed to write to device: {}", e)))
    }

    fn read_until<F>(&mut self, done: F) -> Result<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut buffer = String::new();
        let mut chunk = [0u8; 4096];

        loop {
            let read = match self.stream.read(&mut chunk) {
                Ok(0) => {
                    return Err(VlanAssignError::session(
                        "Device closed the session before the prompt returned",
                    ))
                }
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(VlanAssignError::session(format!(
                        "Failed to read from device: {}",
                        e
                    )))
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk[..read]).replace('\r', ""));
            if done(&buffer) {
                return Ok(buffer);
            }
            if buffer.len() > MAX_OUTPUT_BYTES {
                return Err(VlanAssignError::session(
                    "Device output exceeded the buffer limit without a prompt",
                ));
            }
        }
    }
}

/// Last line of the buffer when it looks like an IOS prompt (`sw1>` or `sw1#`)
fn detect_prompt(buffer: &str) -> Option<String> {
    let last = buffer.trim_end().lines().last()?.trim();
    let is_prompt = last.len() > 1
        && (last.ends_with('#') || last.ends_with('>'))
        && !last.contains(char::is_whitespace);
    is_prompt.then(|| last.to_string())
}

fn ends_with_prompt(buffer: &str, prompt: &str) -> bool {
    buffer
        .trim_end()
        .lines()
        .last()
        .map(|line| line.trim() == prompt)
        .unwrap_or(false)
}

fn strip_echo_and_prompt(raw: &str, command: &str, prompt: &str) -> String {
    let mut lines: Vec<&str> = raw.trim_end().lines().collect();

    if lines.last().map(|l| l.trim() == prompt).unwrap_or(false) {
        lines.pop();
    }
    if lines
        .first()
        .map(|l| l.trim_end().ends_with(command))
        .unwrap_or(false)
    {
        lines.remove(0);
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Byte stream that plays an IOS CLI: echoes each line, prints the
    /// canned answer and the prompt
    struct FakeIos {
        prompt: &'static str,
        answers: Vec<(&'static str, &'static str)>,
        pending: VecDeque<u8>,
        partial: String,
        received: Vec<String>,
        hang_up_after: Option<usize>,
    }

    impl FakeIos {
        fn new(prompt: &'static str, answers: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                prompt,
                answers,
                pending: "\r\nUser Access Verification\r\n\r\n".bytes().collect(),
                partial: String::new(),
                received: Vec::new(),
                hang_up_after: None,
            }
        }

        fn respond(&mut self, line: String) {
            let answer = self
                .answers
                .iter()
                .find(|(command, _)| *command == line)
                .map(|(_, answer)| *answer)
                .unwrap_or(if line.is_empty() {
                    ""
                } else {
                    "% Invalid input detected at '^' marker.\r\n"
                });
            let reply = format!("{}\r\n{}{}", line, answer, self.prompt);
            self.received.push(line);
            self.pending.extend(reply.bytes());
        }
    }

    impl Read for FakeIos {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            // short reads, so prompt detection has to cope with split chunks
            let n = buf.len().min(self.pending.len()).min(7);
            for slot in buf.iter_mut().take(n) {
                *slot = self.pending.pop_front().unwrap_or_default();
            }
            Ok(n)
        }
    }

    impl Write for FakeIos {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Some(limit) = self.hang_up_after {
                if self.received.len() >= limit {
                    return Err(std::io::Error::new(ErrorKind::BrokenPipe, "channel closed"));
                }
            }
            for ch in String::from_utf8_lossy(buf).chars() {
                if ch == '\n' {
                    let line = std::mem::take(&mut self.partial);
                    self.respond(line);
                } else {
                    self.partial.push(ch);
                }
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_open_detects_prompt_and_disables_paging() {
        // Arrange
        let device = FakeIos::new("sw-lab#", vec![(DISABLE_PAGING, "")]);

        // Act
        let shell = CliShell::open(device).unwrap();

        // Assert
        assert_eq!(shell.prompt(), "sw-lab#");
        assert_eq!(shell.into_inner().received, vec!["", DISABLE_PAGING]);
    }

    #[test]
    fn test_several_commands_share_one_stream() {
        let device = FakeIos::new(
            "sw-lab#",
            vec![
                (DISABLE_PAGING, ""),
                ("show vlan", "VLAN Name Status\r\n10   USERS active\r\n"),
                ("show interface status", "Port Name Status\r\nGi1/0/2   notconnect\r\n"),
            ],
        );
        let mut shell = CliShell::open(device).unwrap();

        let vlans = shell.send_command("show vlan").unwrap();
        let ports = shell.send_command("show interface status").unwrap();

        assert_eq!(vlans, "VLAN Name Status\n10   USERS active\n");
        assert_eq!(ports, "Port Name Status\nGi1/0/2   notconnect\n");
    }

    #[test]
    fn test_closed_stream_is_a_session_error() {
        let mut device = FakeIos::new("sw-lab>", vec![(DISABLE_PAGING, "")]);
        device.hang_up_after = Some(2);
        let mut shell = CliShell::open(device).unwrap();

        let err = shell.send_command("show vlan").unwrap_err();

        assert!(err.is_connection_failure());
    }

    #[test]
    fn test_eof_before_prompt_is_a_session_error() {
        struct Silent;
        impl Read for Silent {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Ok(0)
            }
        }
        impl Write for Silent {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = CliShell::open(Silent).err().unwrap();
        assert!(matches!(err, VlanAssignError::Session(_)));
    }

    #[test]
    fn test_prompt_detection() {
        assert_eq!(detect_prompt("banner\nsw1#"), Some("sw1#".to_string()));
        assert_eq!(detect_prompt("sw1>  \n"), Some("sw1>".to_string()));
        assert_eq!(detect_prompt("Password: "), None);
        assert_eq!(detect_prompt("#"), None);
    }
}
