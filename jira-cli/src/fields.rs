// ABOUTME: Maps remote field schemas onto the field kinds the CLI can show and edit
// ABOUTME: Lists remote fields and resolves a display name to its API key and local kind

use jira_sdk::{Field, JiraError};
use serde_json::Value;

use crate::cli_output::CliOutput;
use crate::constants::{schema, spinners};
use crate::session::Session;

/// Local representation of a supported remote schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalKind {
    Numeric,
    Textual,
}

impl LocalKind {
    /// The whitelist: only `number` and `string` schemas are supported
    pub fn from_schema_type(schema_type: &str) -> Option<Self> {
        match schema_type {
            schema::NUMBER => Some(LocalKind::Numeric),
            schema::STRING => Some(LocalKind::Textual),
            _ => None,
        }
    }

    /// Convert user input into the JSON value Jira expects for this kind
    pub fn parse_input(self, raw: &str) -> Option<Value> {
        match self {
            LocalKind::Textual => Some(Value::String(raw.to_string())),
            LocalKind::Numeric => {
                let number = raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
                serde_json::Number::from_f64(number).map(Value::Number)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub kind: LocalKind,
    pub key: String,
}

/// Outcome of looking a field name up in the remote field list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedField),
    NotFound,
    Unsupported { schema_type: Option<String> },
}

pub fn is_supported(schema_type: Option<&str>) -> bool {
    schema_type.and_then(LocalKind::from_schema_type).is_some()
}

/// Fetch every field known to the server, behind a spinner
pub async fn list_fields(session: &Session) -> Result<Vec<Field>, JiraError> {
    session
        .spin(spinners::FIELDS, session.api().list_fields())
        .await
}

/// Exact, case-sensitive lookup by display name; the first match wins
pub fn classify(fields: &[Field], name: &str) -> Resolution {
    let Some(field) = fields.iter().find(|field| field.name == name) else {
        return Resolution::NotFound;
    };

    match field.schema_type().and_then(LocalKind::from_schema_type) {
        Some(kind) => Resolution::Resolved(ResolvedField {
            kind,
            key: field.api_key().to_string(),
        }),
        None => Resolution::Unsupported {
            schema_type: field.schema_type().map(str::to_string),
        },
    }
}

/// Resolve `name` against the server's field list.
///
/// Returns `Ok(None)` after printing a diagnostic when the field does not
/// exist or has an unsupported type. Remote failures are returned as-is.
pub async fn resolve(
    session: &Session,
    output: &CliOutput,
    name: &str,
) -> Result<Option<ResolvedField>, JiraError> {
    let fields = list_fields(session).await?;

    match classify(&fields, name) {
        Resolution::Resolved(resolved) => Ok(Some(resolved)),
        Resolution::NotFound => {
            output.warning(&format!("Unable to find the field \"{name}\""));
            Ok(None)
        }
        Resolution::Unsupported { schema_type } => {
            log::debug!("Field {} has schema type {:?}", name, schema_type);
            output.warning(&format!("Unsupported field \"{name}\""));
            Ok(None)
        }
    }
}

/// Resolve the configured custom fields, keeping display order and silently
/// skipping names that no longer resolve.
pub fn resolve_configured(fields: &[Field], names: &[String]) -> Vec<(String, ResolvedField)> {
    names
        .iter()
        .filter_map(|name| match classify(fields, name) {
            Resolution::Resolved(resolved) => Some((name.clone(), resolved)),
            other => {
                log::debug!("Skipping configured field {}: {:?}", name, other);
                None
            }
        })
        .collect()
}

/// Like [`resolve_configured`], but only lists remote fields when some are configured
pub async fn configured_columns(
    session: &Session,
) -> Result<Vec<(String, ResolvedField)>, JiraError> {
    if session.config().fields().is_empty() {
        return Ok(Vec::new());
    }

    let fields = list_fields(session).await?;
    Ok(resolve_configured(&fields, session.config().fields()))
}
