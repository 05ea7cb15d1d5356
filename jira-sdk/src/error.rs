// ABOUTME: Custom error types for Jira SDK with user-friendly messages
// ABOUTME: Maps HTTP statuses and Jira error bodies onto specific failure modes

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JiraError {
    #[error("Authentication failed. Check the credentials in your config file")]
    Auth,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Please wait before making more requests")]
    RateLimit,

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Invalid connection settings: {0}")]
    Configuration(String),
}

/// Error body returned by the Jira REST API on failed requests
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}

impl ErrorBody {
    fn summary(&self) -> Option<String> {
        let mut parts: Vec<String> = self.error_messages.clone();
        parts.extend(
            self.errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}")),
        );

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

impl JiraError {
    /// Build an error from a non-success HTTP status and its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.summary())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            401 => JiraError::Auth,
            403 => JiraError::Forbidden(message),
            404 => JiraError::NotFound(message),
            429 => JiraError::RateLimit,
            _ => JiraError::Http { status, message },
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            JiraError::Auth => Some(
                "Check the username and API token of the \"jira\" block, or run `jira init`",
            ),
            JiraError::Forbidden(_) => Some("Your account lacks the permission for this action"),
            JiraError::NotFound(_) => Some("Please check the issue or project key (e.g., ENG-123)"),
            JiraError::Network(_) => Some("Check your internet connection and the configured host"),
            JiraError::RateLimit => Some("Wait a moment before making another request"),
            JiraError::Timeout => Some("Try again or check your network connection"),
            JiraError::Configuration(_) => {
                Some("Fix the \"jira\" block of your config file, or run `jira init`")
            }
            _ => None,
        }
    }

    /// Short category label used when rendering diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            JiraError::Auth => "authentication failed",
            JiraError::Forbidden(_) => "permission denied",
            JiraError::NotFound(_) => "not found",
            JiraError::RateLimit => "rate limited",
            JiraError::Http { .. } => "request failed",
            JiraError::Network(_) | JiraError::Timeout => "transport failure",
            JiraError::InvalidResponse(_) => "invalid response",
            JiraError::Configuration(_) => "invalid configuration",
        }
    }
}

impl From<reqwest::Error> for JiraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            JiraError::Timeout
        } else if let Some(status) = err.status() {
            JiraError::from_status(status.as_u16(), "")
        } else if err.is_decode() {
            JiraError::InvalidResponse(err.to_string())
        } else {
            JiraError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for JiraError {
    fn from(err: serde_json::Error) -> Self {
        JiraError::InvalidResponse(err.to_string())
    }
}

impl From<url::ParseError> for JiraError {
    fn from(err: url::ParseError) -> Self {
        JiraError::Configuration(format!("Invalid URL: {err}"))
    }
}
