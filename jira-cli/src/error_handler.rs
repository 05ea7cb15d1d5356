// ABOUTME: Turns a failed command action into a single user-facing diagnostic
// ABOUTME: Picks the message and hint from the Jira or config error found in the chain

use jira_sdk::JiraError;

use crate::cli_output::CliOutput;
use crate::config::ConfigError;

/// What gets printed for a failure
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub hint: Option<&'static str>,
}

impl Diagnostic {
    pub fn render(&self) -> String {
        match self.hint {
            Some(hint) => format!("{} (hint: {})", self.message, hint),
            None => self.message.clone(),
        }
    }
}

fn jira_error(failure: &anyhow::Error) -> Option<&JiraError> {
    failure.chain().find_map(|cause| cause.downcast_ref::<JiraError>())
}

fn config_error(failure: &anyhow::Error) -> Option<&ConfigError> {
    failure.chain().find_map(|cause| cause.downcast_ref::<ConfigError>())
}

pub fn describe(failure: &anyhow::Error) -> Diagnostic {
    let message = format!("{:#}", failure);

    if let Some(err) = jira_error(failure) {
        return Diagnostic {
            message,
            hint: err.help_text(),
        };
    }

    let hint = match config_error(failure) {
        Some(ConfigError::Missing(_)) => Some("Run `jira init` to create it"),
        Some(ConfigError::Parse { .. }) => Some("The config file must be a JSON object"),
        _ => None,
    };
    Diagnostic { message, hint }
}

/// Report a failed action. Returns normally; the caller stops processing.
pub fn show_error(output: &CliOutput, failure: &anyhow::Error) {
    match jira_error(failure) {
        Some(err) => log::debug!("Remote failure ({}): {:?}", err.category(), err),
        None => log::debug!("Command failed: {:?}", failure),
    }

    output.error(&describe(failure).render());
}
