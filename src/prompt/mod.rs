// file: src/prompt/mod.rs
// version: 1.1.0
// guid: 4770c4b7-7eeb-43ac-8718-23244333e93c

//! Line-oriented operator prompts over any reader/writer pair

pub mod format;
pub mod hidden;

pub use format::{notice_text, numbered_list, vlan_listing};
pub use hidden::restore_terminal;

use crate::error::VlanAssignError;
use crate::Result;
use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{BufRead, Write};
use tracing::trace;

/// Interactive prompts reading answers from `input` and writing to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
    hidden_password: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prompter that reads passwords as ordinary lines
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hidden_password: false,
        }
    }

    /// Read passwords from the terminal without echo
    pub fn with_hidden_password(mut self, hidden: bool) -> Self {
        self.hidden_password = hidden;
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(VlanAssignError::input("input closed before an answer was given"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Print a label and return the trimmed answer
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let answer = self.read_line()?;
        trace!("Answer to '{}': {}", label.trim(), answer.trim());
        Ok(answer.trim().to_string())
    }

    /// Ask until the answer is not blank
    pub fn ask_non_blank(&mut self, label: &str, blank_message: &str) -> Result<String> {
        loop {
            let answer = self.ask(label)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.notice(blank_message)?;
        }
    }

    /// Ask a `[Y|N]` question until one of the two is given
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            match self.ask(question)?.to_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                _ => continue,
            }
        }
    }

    /// Read a password, hidden when attached to a terminal
    pub fn password(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        if self.hidden_password {
            let password = hidden::read_hidden_line()?;
            writeln!(self.output)?;
            return Ok(password);
        }
        self.read_line()
    }

    /// Print a line of text
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print a bold heading preceded by a blank line
    pub fn heading(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "\n{}", text.bold())?;
        Ok(())
    }

    /// Print a warning underlined with dashes
    pub fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", notice_text(message).yellow())?;
        Ok(())
    }

    /// Print items as a 1-based list
    pub fn list<S: AsRef<str>>(&mut self, items: &[S]) -> Result<()> {
        write!(self.output, "{}", numbered_list(items))?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn printed(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_ask_trims_answer() {
        // Arrange
        let mut p = prompter("  admin  \r\n");

        // Act
        let answer = p.ask("Username: ").unwrap();

        // Assert
        assert_eq!(answer, "admin");
        assert_eq!(printed(p), "Username: ");
    }

    #[test]
    fn test_ask_non_blank_reprompts() {
        let mut p = prompter("\n   \nnetops\n");

        let answer = p
            .ask_non_blank("Username: ", "Username cannot be blank.")
            .unwrap();

        assert_eq!(answer, "netops");
        let out = printed(p);
        assert_eq!(out.matches("Username: ").count(), 3);
        assert_eq!(out.matches("Username cannot be blank.").count(), 2);
    }

    #[test]
    fn test_confirm_loops_until_y_or_n() {
        let mut p = prompter("maybe\n\ny\n");
        assert!(p.confirm("Continue? [Y|N]: ").unwrap());

        let mut p = prompter("N\n");
        assert!(!p.confirm("Continue? [Y|N]: ").unwrap());
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut p = prompter("maybe\n");
        let err = p.confirm("Continue? [Y|N]: ").unwrap_err();
        assert!(matches!(err, VlanAssignError::Input(_)));
    }

    #[test]
    fn test_password_is_read_as_a_line_when_not_hidden() {
        let mut p = prompter(" s3cret \n");
        // surrounding spaces are part of a password
        assert_eq!(p.password("Password: ").unwrap(), " s3cret ");
    }

    #[test]
    fn test_list_and_notice_output() {
        let mut p = prompter("");
        p.list(&["Gi1/0/2", "Gi1/0/3"]).unwrap();
        p.notice("Quitting script.").unwrap();

        let out = printed(p);
        assert!(out.contains(" 1: Gi1/0/2\n 2: Gi1/0/3\n"));
        assert!(out.contains("Quitting script.\n----------------"));
    }
}
