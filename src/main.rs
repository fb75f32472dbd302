// file: src/main.rs
// version: 2.1.0
// guid: 0c4f7a92-e3b8-4d15-a6c7-58b2e1d93f04

//! vlan-assign - Main entry point

use clap::Parser;
use tokio::signal;
use tracing::{error, warn};
use vlan_assign::{
    cli::{
        apply_cli_overrides, assign_command, error_exit_code, exit_code, Cli, EXIT_FAILURE,
        EXIT_INTERRUPTED,
    },
    config::ConfigLoader,
    logging::logger,
    prompt::restore_terminal,
    Result, VlanAssignError,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.quiet) {
        eprintln!("{}", e);
        std::process::exit(EXIT_FAILURE);
    }

    // Set up signal handling; the wizard blocks on stdin so it cannot be awaited out
    let shutdown_signal = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        code = run(cli) => std::process::exit(code),
        _ = shutdown_signal => {
            warn!("Interrupted by user");
            restore_terminal();
            println!("\n\nQuitting script.");
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}

async fn run(cli: Cli) -> i32 {
    match execute(cli).await {
        Ok(code) => code,
        Err(VlanAssignError::Interrupted(reason)) => {
            warn!("Interrupted: {}", reason);
            println!("\n\nQuitting script.");
            EXIT_INTERRUPTED
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            error_exit_code(&e)
        }
    }
}

async fn execute(cli: Cli) -> Result<i32> {
    let config = ConfigLoader::new()
        .with_explicit_config(cli.config.clone())
        .load()
        .await?;

    // Fail on bad flags before the terminal is taken over
    apply_cli_overrides(config.clone(), &cli)?;

    let outcome = tokio::task::spawn_blocking(move || assign_command(cli, config))
        .await
        .map_err(|e| {
            VlanAssignError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("wizard stopped unexpectedly: {}", e),
            ))
        })??;

    Ok(exit_code(&outcome))
}
