// file: src/cli/commands.rs
// version: 2.1.0
// guid: 7e2c9b14-a06d-4f38-b5e1-93d4c8f0a261

//! Command implementations for the CLI

use super::args::Cli;
use crate::{
    config::AppConfig,
    error::VlanAssignError,
    network::{self, SessionMode},
    prompt::Prompter,
    wizard::{self, Outcome, TemplateSet, WizardOptions},
    Result,
};
use std::io::{IsTerminal, Write};
use tracing::info;

/// Exit status for a run that could not complete
pub const EXIT_FAILURE: i32 = 1;
/// Exit status after Ctrl+C
pub const EXIT_INTERRUPTED: i32 = 130;

/// Layer command line flags over the loaded configuration
pub fn apply_cli_overrides(mut config: AppConfig, cli: &Cli) -> Result<AppConfig> {
    if let Some(port) = cli.port {
        config.connection.port = port;
    }
    if let Some(timeout) = cli.timeout {
        config.connection.timeout_seconds = timeout;
    }
    if let Some(dir) = &cli.templates {
        config.templates.directory = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Exit status for a finished run
pub fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Completed(_) => 0,
        Outcome::Aborted(_) => EXIT_FAILURE,
    }
}

/// Exit status for a run that ended in an error
pub fn error_exit_code(error: &VlanAssignError) -> i32 {
    match error {
        VlanAssignError::Interrupted(_) => EXIT_INTERRUPTED,
        _ => EXIT_FAILURE,
    }
}

/// Run the interactive assignment on the process terminal
pub fn assign_command(cli: Cli, config: AppConfig) -> Result<Outcome> {
    let config = apply_cli_overrides(config, &cli)?;
    let templates = TemplateSet::load(&config)?;

    let mode = if cli.sample {
        info!("Using bundled sample output instead of a live device");
        SessionMode::Sample
    } else {
        SessionMode::Live
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let options = WizardOptions {
        host: cli.host.clone(),
        username: cli.username.clone(),
        clear_screen: !cli.no_clear && stdout.is_terminal(),
    };

    let mut prompter =
        Prompter::new(stdin.lock(), stdout).with_hidden_password(stdin.is_terminal());

    let outcome = wizard::run(
        &mut prompter,
        &config,
        &templates,
        &options,
        |params, credentials| network::connect(mode, params, credentials),
    );
    prompter.output().flush()?;
    outcome
}
