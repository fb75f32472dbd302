// file: tests/integration_test.rs
// version: 2.0.0
// guid: 5b0e8d37-c2a4-4f91-8d6b-e7193a0c4f52

//! Integration tests for vlan-assign

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Cursor;
use tempfile::TempDir;
use vlan_assign::{
    config::{AppConfig, ConfigLoader},
    network::{sample, ConnectionParams, Credentials, DeviceSession, SampleSession},
    prompt::Prompter,
    switch::{collect_interfaces, collect_vlans, eligible_interfaces, Vlan},
    textfsm::{load_template, SHOW_INTERFACES_STATUS_TEMPLATE, SHOW_VLAN_TEMPLATE},
    wizard::{self, Outcome, TemplateSet, WizardOptions},
    Result,
};

/// Binary isolated from any user or project configuration
fn vlan_assign(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vlan-assign").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG")
        .env_remove("VLAN_ASSIGN_PORT")
        .env_remove("VLAN_ASSIGN_TIMEOUT")
        .env_remove("VLAN_ASSIGN_TEMPLATES");
    cmd
}

#[test]
fn test_sample_inventory_through_bundled_templates() -> Result<()> {
    let mut session = SampleSession::new("sw-lab");
    let config = AppConfig::default();
    let templates = TemplateSet::load(&config)?;

    let vlans = collect_vlans(&mut session, &templates.vlan)?;
    let interfaces = collect_interfaces(&mut session, &templates.interface_status)?;
    let eligible = eligible_interfaces(&interfaces, &config.eligibility_rules());

    assert_eq!(vlans.len(), 9);
    assert_eq!(vlans[1], Vlan::new(10, "USERS"));
    assert_eq!(interfaces.len(), 15);
    assert_eq!(
        eligible,
        vec!["Gi1/0/2", "Gi1/0/3", "Gi1/0/5", "Gi1/0/8", "Gi1/0/9", "Gi1/0/10", "Gi1/0/12"]
    );
    Ok(())
}

#[test]
fn test_template_directory_overrides_builtin() -> Result<()> {
    // Arrange: a VLAN template that only knows VLAN 99
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(SHOW_VLAN_TEMPLATE),
        "Value VLAN_ID (99)\nValue NAME (\\S+)\n\nStart\n  ^${VLAN_ID}\\s+${NAME}\\s+active -> Record\n",
    )
    .unwrap();

    // Act
    let vlan_template = load_template(Some(dir.path()), SHOW_VLAN_TEMPLATE)?;
    let status_template = load_template(Some(dir.path()), SHOW_INTERFACES_STATUS_TEMPLATE)?;
    let table = vlan_template.parse_text(sample::SAMPLE_SHOW_VLAN)?;
    let status = status_template.parse_text(sample::SAMPLE_SHOW_INTERFACES_STATUS)?;

    // Assert
    assert_eq!(table.len(), 1);
    assert_eq!(status.len(), 15);
    Ok(())
}

#[test]
fn test_wizard_run_with_scripted_operator() -> Result<()> {
    let config = AppConfig::default();
    let templates = TemplateSet::load(&config)?;
    let mut prompter = Prompter::new(
        Cursor::new(b"netops\nsecret\nsw-lab\ny\n1\n20\n2-3,7\ny\n".to_vec()),
        Vec::new(),
    );

    let outcome = wizard::run(
        &mut prompter,
        &config,
        &templates,
        &WizardOptions::default(),
        |params: &ConnectionParams, _: &Credentials| -> Result<Box<dyn DeviceSession>> {
            Ok(Box::new(SampleSession::new(&params.host)))
        },
    )?;

    let selection = match outcome {
        Outcome::Completed(selection) => selection,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(selection.vlan.id, 20);
    assert_eq!(selection.interfaces, vec!["Gi1/0/3", "Gi1/0/5", "Gi1/0/12"]);

    let printed = String::from_utf8(prompter.into_output()).unwrap();
    assert!(printed.contains("Please choose a different VLAN ID"));
    Ok(())
}

#[tokio::test]
async fn test_loader_reads_project_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join(".vlan-assign.toml");
    tokio::fs::write(&project, "[selection]\nexcluded_port_prefixes = [\"Te\", \"Po\"]\n").await?;

    let config = ConfigLoader::empty()
        .with_project_config(Some(project))
        .load_with_env(|_| None)
        .await?;

    assert_eq!(config.selection.excluded_port_prefixes, vec!["Te", "Po"]);
    assert_eq!(config.connection.port, 22);
    Ok(())
}

#[test]
fn test_binary_sample_mode_end_to_end() {
    let home = TempDir::new().unwrap();

    vlan_assign(&home)
        .args(["--sample", "--no-clear"])
        .write_stdin("admin\nsecret\nsw-lab\nY\n20\n1-2\nY\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Device: sw-lab, Status: authenticated"))
        .stdout(predicate::str::contains("Access VLAN: 20 (VOICE)"))
        .stdout(predicate::str::contains("interface Gi1/0/2"))
        .stdout(predicate::str::contains("interface Gi1/0/3"));
}

#[test]
fn test_binary_fails_when_input_ends_early() {
    let home = TempDir::new().unwrap();

    vlan_assign(&home)
        .args(["--sample", "--no-clear", "--host", "sw-lab"])
        .write_stdin("admin\nsecret\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input error"));
}

#[test]
fn test_binary_rejects_missing_config_file() {
    let home = TempDir::new().unwrap();

    vlan_assign(&home)
        .args(["--sample", "--config", "/nonexistent/vlan-assign.toml"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_binary_help() {
    let home = TempDir::new().unwrap();

    vlan_assign(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--sample"));
}
