// ABOUTME: Shared fixtures for the CLI integration tests
// ABOUTME: Writes temporary config files pointed at a mockito Jira server

#![allow(dead_code)]

use jira_cli::cli_output::CliOutput;
use mockito::ServerGuard;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Connection block for the mock server with `user`/`secret` basic auth
pub fn connection(server: &ServerGuard) -> Value {
    json!({
        "protocol": "http",
        "host": server.host_with_port(),
        "username": "user",
        "password": "secret"
    })
}

pub fn write_config(dir: &TempDir, contents: &Value) -> PathBuf {
    let path = dir.path().join("jira.json");
    std::fs::write(&path, serde_json::to_string_pretty(contents).unwrap()).unwrap();
    path
}

pub fn read_config(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn argv(config: &Path, args: &[&str]) -> Vec<String> {
    let mut argv: Vec<String> = vec![
        "jira".to_string(),
        "--no-color".to_string(),
        "--config".to_string(),
        config.display().to_string(),
    ];
    argv.extend(args.iter().map(|arg| arg.to_string()));
    argv
}

/// Run the CLI in-process against `config`
pub async fn run(config: &Path, args: &[&str]) -> anyhow::Result<()> {
    jira_cli::cli::run_from(argv(config, args)).await
}

/// Run the CLI in-process and return the diagnostic lines it printed
pub async fn run_diagnostics(config: &Path, args: &[&str]) -> String {
    let buffer = Rc::new(RefCell::new(Vec::new()));
    let output = CliOutput::with_writer(false, buffer.clone());
    jira_cli::cli::run_with_output(argv(config, args), output)
        .await
        .unwrap();
    let written = buffer.borrow().clone();
    String::from_utf8(written).unwrap()
}

pub fn fields_body() -> String {
    json!([
        { "id": "summary", "key": "summary", "name": "Summary", "custom": false,
          "schema": { "type": "string", "system": "summary" } },
        { "id": "customfield_10016", "key": "customfield_10016", "name": "Story Points", "custom": true,
          "schema": { "type": "number", "custom": "com.atlassian.jira.plugin.system.customfieldtypes:float" } },
        { "id": "customfield_10014", "key": "customfield_10014", "name": "Epic Link", "custom": true,
          "schema": { "type": "array", "items": "string" } },
        { "id": "issuekey", "key": "issuekey", "name": "Key", "custom": false }
    ])
    .to_string()
}

pub async fn mock_fields(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/rest/api/2/field")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fields_body())
        .create_async()
        .await
}
