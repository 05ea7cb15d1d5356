// ABOUTME: This module handles table and detail formatting for the Jira CLI
// ABOUTME: Renders fields, presets, issues, projects and sprints with optional color

use chrono::DateTime;
use jira_sdk::{Board, Field, Issue, Project, Sprint};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::collections::BTreeMap;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::fields::{self, ResolvedField};
use crate::types::StatusCategory;

const SUMMARY_WIDTH: usize = 60;

pub struct TableFormatter {
    use_color: bool,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Supported")]
    supported: bool,
    #[tabled(rename = "Type")]
    field_type: String,
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Query")]
    query: String,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    project_type: String,
}

#[derive(Tabled)]
struct SprintRow {
    #[tabled(rename = "Board")]
    board: String,
    #[tabled(rename = "Id")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::blank());
    table.to_string()
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Render an issue field value the way a person would read it
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => ["displayName", "name", "value", "key"]
            .iter()
            .find_map(|member| map.get(*member).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
    }
}

/// Jira timestamps look like `2024-01-15T10:30:00.000+0000`
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn blue(&self, text: &str) -> String {
        if self.use_color {
            text.blue().to_string()
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.use_color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_status(&self, issue: &Issue) -> String {
        let status = issue.status();
        let name = status
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_default();

        if !self.use_color {
            return name;
        }

        match StatusCategory::from(status.as_ref()) {
            StatusCategory::ToDo => name.dimmed().to_string(),
            StatusCategory::InProgress => name.yellow().to_string(),
            StatusCategory::Done => name.green().to_string(),
            StatusCategory::Unknown(_) => name,
        }
    }

    fn format_assignee(&self, assignee: Option<&str>) -> String {
        match assignee {
            Some(name) => name.to_string(),
            None if self.use_color => "Unassigned".dimmed().to_string(),
            None => "Unassigned".to_string(),
        }
    }

    /// Every remote field, with the schema type only shown when supported
    pub fn fields_table(&self, fields: &[Field]) -> String {
        let rows = fields
            .iter()
            .map(|field| {
                let supported = fields::is_supported(field.schema_type());
                FieldRow {
                    name: self.blue(&field.name),
                    supported,
                    field_type: if supported {
                        field.schema_type().unwrap_or_default().to_string()
                    } else {
                        String::new()
                    },
                }
            })
            .collect();
        render::<FieldRow>(rows)
    }

    pub fn configured_fields_table(&self, names: &[String]) -> String {
        let rows = names
            .iter()
            .map(|name| NameRow {
                name: self.blue(name),
            })
            .collect();
        render::<NameRow>(rows)
    }

    pub fn presets_table(&self, presets: &BTreeMap<String, String>) -> String {
        let rows = presets
            .iter()
            .map(|(name, query)| PresetRow {
                name: self.blue(name),
                query: self.green(query),
            })
            .collect();
        render::<PresetRow>(rows)
    }

    /// Issue table with one extra column per configured custom field
    pub fn issues_table(&self, issues: &[Issue], columns: &[(String, ResolvedField)]) -> String {
        let mut builder = Builder::default();

        let mut header: Vec<String> = ["Key", "Type", "Status", "Summary", "Assignee"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        header.extend(columns.iter().map(|(name, _)| name.clone()));
        builder.push_record(header);

        for issue in issues {
            let mut row = vec![
                self.blue(&issue.key),
                issue.issue_type().unwrap_or_default().to_string(),
                self.format_status(issue),
                truncate(issue.summary(), SUMMARY_WIDTH),
                self.format_assignee(issue.assignee()),
            ];
            row.extend(columns.iter().map(|(_, field)| {
                issue
                    .field(&field.key)
                    .map(format_value)
                    .unwrap_or_default()
            }));
            builder.push_record(row);
        }

        let mut table = builder.build();
        table.with(Style::blank());
        table.to_string()
    }

    pub fn issue_details(&self, issue: &Issue, columns: &[(String, ResolvedField)]) -> String {
        let mut lines = vec![format!(
            "{}: {}",
            self.bold(&issue.key),
            self.bold(issue.summary())
        )];
        lines.push(String::new());

        let mut push = |label: &str, value: String| {
            if !value.is_empty() {
                lines.push(format!("{:<10} {}", format!("{label}:"), value));
            }
        };

        push("Status", self.format_status(issue));
        push("Type", issue.issue_type().unwrap_or_default().to_string());
        push("Priority", issue.priority().unwrap_or_default().to_string());
        push("Assignee", self.format_assignee(issue.assignee()));
        push("Reporter", issue.reporter().unwrap_or_default().to_string());
        push(
            "Created",
            issue.created().map(format_timestamp).unwrap_or_default(),
        );
        push(
            "Updated",
            issue.updated().map(format_timestamp).unwrap_or_default(),
        );
        for (name, field) in columns {
            push(
                name,
                issue.field(&field.key).map(format_value).unwrap_or_default(),
            );
        }

        if let Some(description) = issue.description().filter(|d| !d.trim().is_empty()) {
            lines.push(String::new());
            lines.push(description.trim_end().to_string());
        }

        lines.join("\n")
    }

    pub fn projects_table(&self, projects: &[Project]) -> String {
        let rows = projects
            .iter()
            .map(|project| ProjectRow {
                key: self.blue(&project.key),
                name: project.name.clone(),
                project_type: project.project_type_key.clone().unwrap_or_default(),
            })
            .collect();
        render::<ProjectRow>(rows)
    }

    pub fn project_details(&self, project: &Project) -> String {
        let mut lines = vec![format!(
            "{}: {}",
            self.bold(&project.key),
            self.bold(&project.name)
        )];
        if let Some(lead) = &project.lead {
            lines.push(format!("Lead:        {}", lead.display_name));
        }
        if let Some(kind) = &project.project_type_key {
            lines.push(format!("Type:        {kind}"));
        }
        let issue_types: Vec<&str> = project
            .issue_types
            .iter()
            .map(|issue_type| issue_type.name.as_str())
            .collect();
        if !issue_types.is_empty() {
            lines.push(format!("Issue types: {}", issue_types.join(", ")));
        }
        if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(String::new());
            lines.push(description.to_string());
        }
        lines.join("\n")
    }

    pub fn sprints_table(&self, sprints: &[(Board, Sprint)]) -> String {
        let date = |raw: &Option<String>| raw.as_deref().map(format_timestamp).unwrap_or_default();
        let rows = sprints
            .iter()
            .map(|(board, sprint)| SprintRow {
                board: board.name.clone(),
                id: sprint.id,
                name: self.blue(&sprint.name),
                state: sprint.state.clone(),
                start: date(&sprint.start_date),
                end: date(&sprint.end_date),
            })
            .collect();
        render::<SprintRow>(rows)
    }
}
