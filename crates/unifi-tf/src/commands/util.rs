//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use serde::Serialize;
use tabled::Tabled;

use unifi_tf_core::{AttributeBag, ResourceType};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;
use crate::state_file::TrackedResource;

/// Parse a resource type name such as `unifi_network`.
pub fn resource_type(name: &str) -> Result<ResourceType, CliError> {
    name.parse().map_err(|_| CliError::UnknownType {
        name: name.to_owned(),
    })
}

/// State addresses are free-form but must be non-blank.
pub fn check_address(address: &str) -> Result<(), CliError> {
    if address.trim().is_empty() {
        return Err(CliError::Validation {
            field: "address".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

/// Read a plan document (`-` reads stdin). Must be a JSON object.
pub fn read_plan(path: &Path) -> Result<AttributeBag, CliError> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    let value: serde_json::Value = serde_json::from_str(&contents)?;
    match value {
        serde_json::Value::Object(map) => Ok(AttributeBag::from(map)),
        other => Err(CliError::Validation {
            field: "plan".into(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.to_owned(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

// ── Resource views ───────────────────────────────────────────────────

/// A tracked resource together with its address, for output.
#[derive(Serialize)]
pub struct ResourceView<'a> {
    pub address: &'a str,
    #[serde(flatten)]
    pub resource: &'a TrackedResource,
}

#[derive(Tabled)]
pub struct ResourceRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Key")]
    natural_key: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&ResourceView<'_>> for ResourceRow {
    fn from(v: &ResourceView<'_>) -> Self {
        let identity = &v.resource.identity;
        Self {
            address: v.address.to_owned(),
            resource_type: v.resource.resource_type.clone(),
            id: identity.id.as_known().cloned().unwrap_or_default(),
            natural_key: identity.natural_key.as_known().cloned().unwrap_or_default(),
            updated: v.resource.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Key/value listing of every state attribute.
pub fn detail(view: &ResourceView<'_>) -> String {
    let attributes = view.resource.state.clone().into_inner();
    let width = attributes
        .keys()
        .map(String::len)
        .chain(["address".len(), "type".len()])
        .max()
        .unwrap_or_default();

    let mut lines = vec![
        format!("{:<width$}  {}", "address", view.address),
        format!("{:<width$}  {}", "type", view.resource.resource_type),
    ];
    lines.extend(
        attributes
            .iter()
            .map(|(k, v)| format!("{k:<width$}  {}", output::attribute_cell(Some(v)))),
    );
    lines.join("\n")
}

/// Render and print one tracked resource.
pub fn print_resource(global: &GlobalOpts, address: &str, resource: &TrackedResource) -> Result<(), CliError> {
    let view = ResourceView { address, resource };
    let out = output::render_single(global.output, &view, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
