// ABOUTME: Type definitions and enums for the Jira CLI
// ABOUTME: Maps Jira status categories onto the three states used for coloring

use crate::constants::status_category;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum StatusCategory {
    ToDo,
    InProgress,
    Done,
    Unknown(String),
}

impl From<&str> for StatusCategory {
    fn from(key: &str) -> Self {
        match key {
            status_category::NEW => StatusCategory::ToDo,
            status_category::IN_PROGRESS => StatusCategory::InProgress,
            status_category::DONE => StatusCategory::Done,
            other => StatusCategory::Unknown(other.to_string()),
        }
    }
}

impl From<Option<&jira_sdk::Status>> for StatusCategory {
    fn from(status: Option<&jira_sdk::Status>) -> Self {
        status
            .and_then(|s| s.status_category.as_ref())
            .map(|category| StatusCategory::from(category.key.as_str()))
            .unwrap_or_else(|| StatusCategory::Unknown(String::new()))
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCategory::ToDo => write!(f, "To Do"),
            StatusCategory::InProgress => write!(f, "In Progress"),
            StatusCategory::Done => write!(f, "Done"),
            StatusCategory::Unknown(s) => write!(f, "{}", s),
        }
    }
}
