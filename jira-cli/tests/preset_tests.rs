// ABOUTME: End-to-end tests for `jira preset` and `jira run`
// ABOUTME: Presets are purely local; running one issues a single search

mod common;

use common::*;
use jira_cli::config::ConfigStore;
use jira_cli::output::TableFormatter;
use mockito::Matcher;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_create_then_list() {
    let server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({ "jira": connection(&server), "fields": [], "presets": {} }),
    );

    run(&path, &["preset", "create", "mine", "assignee = currentUser()"])
        .await
        .unwrap();
    run(&path, &["preset", "list"]).await.unwrap();

    let store = ConfigStore::load(&path).unwrap();
    assert_eq!(store.preset("mine"), Some("assignee = currentUser()"));

    let table = TableFormatter::new(false).presets_table(store.presets());
    let row = table.lines().find(|line| line.contains("mine")).unwrap();
    assert!(row.contains("assignee = currentUser()"));
}

#[tokio::test]
async fn test_create_existing_preset_keeps_query() {
    let server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({
            "jira": connection(&server),
            "fields": [],
            "presets": { "mine": "assignee = currentUser()" }
        }),
    );
    let before = std::fs::read(&path).unwrap();

    run(&path, &["preset", "create", "mine", "project = ENG"])
        .await
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn test_remove_preset() {
    let server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({
            "jira": connection(&server),
            "fields": [],
            "presets": { "mine": "assignee = currentUser()", "bugs": "type = Bug" }
        }),
    );

    run(&path, &["preset", "remove", "mine"]).await.unwrap();
    assert_eq!(read_config(&path)["presets"], json!({ "bugs": "type = Bug" }));

    let before = std::fs::read(&path).unwrap();
    run(&path, &["preset", "remove", "mine"]).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn test_run_unknown_preset_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let untouched = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({ "jira": connection(&server), "fields": [], "presets": {} }),
    );

    run(&path, &["run", "nope"]).await.unwrap();

    untouched.assert_async().await;
}

#[tokio::test]
async fn test_run_preset_searches_with_its_query() {
    let mut server = mockito::Server::new_async().await;
    let search = server
        .mock("GET", Matcher::Regex(r"^/rest/api/2/search".to_string()))
        .match_query(Matcher::UrlEncoded(
            "jql".to_string(),
            "assignee = currentUser()".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"startAt":0,"maxResults":50,"total":0,"issues":[]}"#)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({
            "jira": connection(&server),
            "fields": [],
            "presets": { "mine": "assignee = currentUser()" }
        }),
    );

    run(&path, &["run", "mine"]).await.unwrap();

    search.assert_async().await;
}
