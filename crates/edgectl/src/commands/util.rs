//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;

use edgectl_core::{Outcome, Route, ViewState};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Report a view outcome: notifications to stderr, and an error when the
/// operation failed. A redirect to login means the session is gone.
pub fn finish(outcome: Outcome, global: &GlobalOpts) -> Result<(), CliError> {
    for notification in &outcome.notifications {
        output::print_notification(notification, global);
    }
    if outcome.is_ok() {
        return Ok(());
    }
    if outcome.redirect == Some(Route::Login) {
        return Err(CliError::SessionExpired);
    }
    let message = outcome
        .errors()
        .map(|n| n.message.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Err(CliError::OperationFailed {
        message: if message.is_empty() {
            "operation failed".into()
        } else {
            message
        },
    })
}

/// Report a load outcome, then hand back the loaded data.
pub fn loaded<T: Clone + Default>(
    outcome: Outcome,
    state: &ViewState<T>,
    global: &GlobalOpts,
) -> Result<T, CliError> {
    finish(outcome, global)?;
    Ok(state.snapshot())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        })
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Read a `--from-file` payload into a typed resource.
pub fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let value = read_json_file(path)?;
    serde_json::from_value(value).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("unexpected shape: {e}"),
    })
}

/// Join a list for a table cell.
pub fn join(items: &[String]) -> String {
    items.join(", ")
}
