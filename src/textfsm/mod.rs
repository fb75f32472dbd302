// file: src/textfsm/mod.rs
// version: 1.0.0
// guid: a3ae8f0b-2d86-4de6-95bc-b9ea79105454

//! Template-driven parsing of screen-scraped CLI output
//!
//! Implements the TextFSM template language used by ntc-templates, so the
//! same template files can be dropped into the template directory.

pub mod engine;
pub mod template;

pub use engine::{parse_text, ParsedTable, ParsedValue, Record};
pub use template::Template;

use crate::Result;
use std::path::Path;
use tracing::{debug, info};

/// File name of the `show vlan` template
pub const SHOW_VLAN_TEMPLATE: &str = "show_vlan.template";
/// File name of the `show interface status` template
pub const SHOW_INTERFACES_STATUS_TEMPLATE: &str = "show_interfaces_status.template";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        SHOW_VLAN_TEMPLATE,
        include_str!("../../templates/show_vlan.template"),
    ),
    (
        SHOW_INTERFACES_STATUS_TEMPLATE,
        include_str!("../../templates/show_interfaces_status.template"),
    ),
];

/// Template text compiled into the binary, if one exists under this name
pub fn builtin_template(file_name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, text)| *text)
}

/// Load a template from the template directory, falling back to the built-in copy
pub fn load_template(dir: Option<&Path>, file_name: &str) -> Result<Template> {
    if let Some(dir) = dir {
        let path = dir.join(file_name);
        if path.is_file() {
            info!("Using template {}", path.display());
            return Template::from_file(&path);
        }
        debug!("Template {} not found, trying built-in copy", path.display());
    }

    match builtin_template(file_name) {
        Some(text) => Template::parse(text),
        None => Err(crate::error::VlanAssignError::template(format!(
            "No template named '{}' in {} and no built-in copy",
            file_name,
            dir.map(|d| d.display().to_string())
                .unwrap_or_else(|| "<none>".to_string())
        ))),
    }
}
