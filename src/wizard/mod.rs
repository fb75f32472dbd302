// file: src/wizard/mod.rs
// version: 1.1.0
// guid: 9788621e-7859-4fa2-b513-6f05569512d5

//! The interactive assignment flow
//!
//! credentials -> hostname -> session -> `show vlan` / `show interface status`
//! -> eligible ports -> VLAN choice -> port choice -> summary -> preview

pub mod steps;

use crate::config::AppConfig;
use crate::logging::logger::with_operation_span;
use crate::network::{ConnectionParams, Credentials, DeviceSession};
use crate::prompt::Prompter;
use crate::switch::{
    collect_interfaces, collect_vlans, eligible_interfaces, render_access_config, InterfaceStatus,
    Selection, Vlan, SHOW_INTERFACE_STATUS, SHOW_VLAN,
};
use crate::textfsm::{load_template, Template};
use crate::Result;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Compiled templates for both show commands
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub vlan: Template,
    pub interface_status: Template,
}

impl TemplateSet {
    /// Load both templates from the configured directory or the built-in copies
    pub fn load(config: &AppConfig) -> Result<Self> {
        let dir = config.template_dir();
        Ok(Self {
            vlan: load_template(dir.as_deref(), &config.templates.vlan)?,
            interface_status: load_template(dir.as_deref(), &config.templates.interface_status)?,
        })
    }
}

/// Answers supplied up front instead of prompted for
#[derive(Debug, Clone, Default)]
pub struct WizardOptions {
    pub host: Option<String>,
    pub username: Option<String>,
    pub clear_screen: bool,
}

/// Why a run stopped before a selection could be made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    NoVlans,
    NoAssignableVlans,
    NoInterfaces,
    NoEligibleInterfaces,
}

impl AbortReason {
    pub fn message(&self) -> &'static str {
        match self {
            AbortReason::NoVlans => "The script did not find any VLANs. Quitting script.",
            AbortReason::NoAssignableVlans => {
                "Every VLAN on the device is reserved. Quitting script."
            }
            AbortReason::NoInterfaces => {
                "The script did not find any interfaces. Quitting script."
            }
            AbortReason::NoEligibleInterfaces => {
                "The script did not find any available interfaces. Quitting script."
            }
        }
    }
}

/// Result of a wizard run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Selection),
    Aborted(AbortReason),
}

struct Inventory {
    vlans: Vec<Vlan>,
    interfaces: Vec<InterfaceStatus>,
}

fn collect<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    session: &mut dyn DeviceSession,
    templates: &TemplateSet,
) -> Result<std::result::Result<Inventory, AbortReason>> {
    let host = session.host().to_string();

    prompter.say(&format!("Device: {}, Command: {}", host, SHOW_VLAN))?;
    let vlans = collect_vlans(session, &templates.vlan)?;
    if vlans.is_empty() {
        return Ok(Err(AbortReason::NoVlans));
    }

    prompter.say(&format!("Device: {}, Command: {}", host, SHOW_INTERFACE_STATUS))?;
    let interfaces = collect_interfaces(session, &templates.interface_status)?;
    if interfaces.is_empty() {
        return Ok(Err(AbortReason::NoInterfaces));
    }

    info!(
        "Collected {} VLAN(s) and {} interface(s) from {}",
        vlans.len(),
        interfaces.len(),
        host
    );
    Ok(Ok(Inventory { vlans, interfaces }))
}

/// Run the whole flow; `connect` opens the device session
pub fn run<R, W, C>(
    prompter: &mut Prompter<R, W>,
    config: &AppConfig,
    templates: &TemplateSet,
    options: &WizardOptions,
    connect: C,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
    C: FnOnce(&ConnectionParams, &Credentials) -> Result<Box<dyn DeviceSession>>,
{
    if options.clear_screen {
        prompter.clear_screen()?;
    }

    let credentials = steps::ask_credentials(prompter, options.username.as_deref())?;
    let host = steps::ask_hostname(prompter, options.host.as_deref())?;
    let params = config.connection_params(&host);

    let mut session = match connect(&params, &credentials) {
        Ok(session) => {
            prompter.say(&format!("\nDevice: {}, Status: authenticated", host))?;
            session
        }
        Err(e) if e.is_connection_failure() => {
            warn!("Connection to {} failed: {}", host, e);
            prompter.say(&format!("\nDevice: {}, Status: authentication failure", host))?;
            prompter.say(&format!(
                "There appears to be an issue with authenticating onto: {}",
                host
            ))?;
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let collected = with_operation_span("collect", || collect(prompter, session.as_mut(), templates));
    session.disconnect();

    let inventory = match collected? {
        Ok(inventory) => inventory,
        Err(reason) => {
            prompter.notice(reason.message())?;
            return Ok(Outcome::Aborted(reason));
        }
    };

    let reserved = &config.selection.reserved_vlans;
    if inventory.vlans.iter().all(|vlan| reserved.contains(&vlan.id)) {
        let reason = AbortReason::NoAssignableVlans;
        prompter.notice(reason.message())?;
        return Ok(Outcome::Aborted(reason));
    }

    let available = eligible_interfaces(&inventory.interfaces, &config.eligibility_rules());
    if available.is_empty() {
        let reason = AbortReason::NoEligibleInterfaces;
        prompter.notice(reason.message())?;
        return Ok(Outcome::Aborted(reason));
    }
    info!("{} interface(s) eligible for access assignment", available.len());

    loop {
        let vlan = steps::ask_vlan(prompter, &inventory.vlans, reserved)?;
        let interfaces = steps::ask_interfaces(prompter, &available)?;
        let selection = Selection { vlan, interfaces };

        steps::print_summary(prompter, &selection)?;
        if prompter.confirm("\nDoes this look correct? [Y|N]: ")? {
            prompter.heading("Configuration preview:")?;
            prompter.say(render_access_config(&selection).trim_end())?;
            info!(
                "Selected VLAN {} for {} port(s)",
                selection.vlan.id,
                selection.interfaces.len()
            );
            return Ok(Outcome::Completed(selection));
        }
        prompter.notice("Restarting selection.")?;
    }
}
