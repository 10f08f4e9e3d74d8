//! The GitHub Actions side of the tool: inputs in, outputs and status out.

pub mod command;
pub mod inputs;
pub mod outputs;

use crate::publish::PublishOutcome;
use crate::utils::logger::{LogLevel, Logger};

pub use inputs::{ActionInputs, InputError, PublishConfig};

pub fn report_outcome(outcome: &PublishOutcome) -> std::io::Result<()> {
    outputs::set_output("version", &outcome.version)?;
    outputs::set_output("version-id", &outcome.version_id.to_string())?;
    outputs::set_output("version-edit-url", &outcome.edit_url)?;
    Ok(())
}

/// Marks the run as failed. The caller is responsible for the exit status.
pub fn report_failure(error: &anyhow::Error) {
    let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
    Logger::new().log_message_with_trace(
        LogLevel::Error,
        &error.to_string(),
        causes.iter().map(String::as_str).collect(),
    );
}
