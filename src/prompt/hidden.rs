// file: src/prompt/hidden.rs
// version: 1.0.0
// guid: d49a2e07-6b3c-4f18-a5d2-8c71e0f3b964

//! No-echo password entry on the controlling terminal
//!
//! The terminal is put in raw mode for the duration of the read. In raw mode
//! Ctrl+C arrives as a key press rather than SIGINT, so it is turned into an
//! `Interrupted` error after the terminal has been restored.

use crate::error::VlanAssignError;
use crate::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::warn;

/// Keeps raw mode on while alive
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave raw mode; safe to call when raw mode is not active
pub fn restore_terminal() {
    if let Err(e) = terminal::disable_raw_mode() {
        warn!("Failed to restore terminal mode: {}", e);
    }
}

/// Read a password from the terminal without echoing it
pub fn read_hidden_line() -> Result<String> {
    let _raw = RawModeGuard::enable()?;
    collect_hidden(|| loop {
        if let Event::Key(key) = event::read()? {
            return Ok(key);
        }
    })
}

/// Assemble a line from key presses until Enter
pub fn collect_hidden<F>(mut next_key: F) -> Result<String>
where
    F: FnMut() -> Result<KeyEvent>,
{
    let mut line = String::new();
    loop {
        let key = next_key()?;
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(line),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(VlanAssignError::interrupted("password entry cancelled"));
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if line.is_empty() {
                    return Err(VlanAssignError::input(
                        "input closed before an answer was given",
                    ));
                }
            }
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char(ch) => line.push(ch),
            _ => {}
        }
    }
}
