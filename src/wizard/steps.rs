// file: src/wizard/steps.rs
// version: 1.0.0
// guid: 3668f738-3c15-49d4-b7e6-b1cbaeeb99c7

//! Individual operator prompts of the assignment flow

use crate::network::Credentials;
use crate::prompt::{vlan_listing, Prompter};
use crate::selection::{choose_vlan, parse_index_selection, resolve_selection};
use crate::switch::{Selection, Vlan};
use crate::Result;
use std::io::{BufRead, Write};
use tracing::debug;

const BLANK_USERNAME: &str = "Username cannot be blank.";
const BLANK_VALUE: &str = "Do not enter blank values.";

/// Username (asked unless preset) and password
pub fn ask_credentials<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    preset_username: Option<&str>,
) -> Result<Credentials> {
    let username = match preset_username.map(str::trim).filter(|u| !u.is_empty()) {
        Some(username) => username.to_string(),
        None => prompter.ask_non_blank("\nUsername: ", BLANK_USERNAME)?,
    };
    let password = prompter.password("Password: ")?;
    Ok(Credentials::new(username, password))
}

fn normalize_host(host: &str) -> String {
    host.trim().to_lowercase()
}

/// Hostname, lower-cased and confirmed by the operator
pub fn ask_hostname<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    preset_host: Option<&str>,
) -> Result<String> {
    let mut host = match preset_host.map(normalize_host).filter(|h| !h.is_empty()) {
        Some(host) => host,
        None => normalize_host(&prompter.ask_non_blank("\nEnter device hostname: ", BLANK_VALUE)?),
    };

    loop {
        let question = format!(
            "\nYou entered: {}. Would you like to continue? [Y|N]: ",
            host
        );
        if prompter.confirm(&question)? {
            debug!("Hostname confirmed: {}", host);
            return Ok(host);
        }
        host = normalize_host(&prompter.ask_non_blank("\nEnter device hostname: ", BLANK_VALUE)?);
    }
}

/// Show the VLANs and ask until a valid one is chosen
pub fn ask_vlan<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    vlans: &[Vlan],
    reserved: &[u16],
) -> Result<Vlan> {
    prompter.heading("List of available VLANs:")?;
    write!(prompter.output(), "{}", vlan_listing(vlans))?;

    loop {
        let answer = prompter.ask("\nEnter the VLAN ID that you would like to configure: ")?;
        match choose_vlan(&answer, vlans, reserved) {
            Ok(vlan) => return Ok(vlan),
            Err(reason) => prompter.say(&format!("\n  {}", reason))?,
        }
    }
}

/// Show the eligible interfaces and ask for a comma/range selection
pub fn ask_interfaces<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    available: &[String],
) -> Result<Vec<String>> {
    prompter.heading("List of available interfaces:")?;
    prompter.list(available)?;
    prompter.say(
        "\nEnter the integer values of the interfaces you would like this VLAN on.\n\
         Comma separated list and/or ranges are supported.\n",
    )?;

    loop {
        let answer = prompter.ask("Integer values: ")?;
        let picked = parse_index_selection(&answer, available.len())
            .and_then(|indices| resolve_selection(&indices, available));
        match picked {
            Ok(interfaces) => return Ok(interfaces),
            Err(reason) => prompter.say(&format!("\n  {}\n", reason))?,
        }
    }
}

/// Print the VLAN and ports about to be used
pub fn print_summary<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    selection: &Selection,
) -> Result<()> {
    prompter.heading("Please confirm the information below:")?;
    prompter.say(&format!(
        "\nAccess VLAN: {} ({})",
        selection.vlan.id, selection.vlan.name
    ))?;
    prompter.say("\nAccess ports: ")?;
    prompter.list(&selection.interfaces)
}
