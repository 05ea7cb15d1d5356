// ABOUTME: End-to-end tests for `jira set` against a mock Jira server
// ABOUTME: Verifies the request bodies sent for field, status and assignee updates

mod common;

use common::*;
use mockito::Matcher;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_set_numeric_field() {
    let mut server = mockito::Server::new_async().await;
    let _fields = mock_fields(&mut server).await;
    let update = server
        .mock("PUT", "/rest/api/2/issue/ENG-1")
        .match_body(Matcher::Json(json!({ "fields": { "customfield_10016": 5.0 } })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({ "jira": connection(&server), "fields": [], "presets": {} }),
    );

    run(&path, &["set", "field", "ENG-1", "Story Points", "5"])
        .await
        .unwrap();

    update.assert_async().await;
}

#[tokio::test]
async fn test_set_numeric_field_rejects_text_locally() {
    let mut server = mockito::Server::new_async().await;
    let _fields = mock_fields(&mut server).await;
    let update = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({ "jira": connection(&server), "fields": [], "presets": {} }),
    );

    run(&path, &["set", "field", "ENG-1", "Story Points", "five"])
        .await
        .unwrap();

    update.assert_async().await;
}

#[tokio::test]
async fn test_set_unsupported_field_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let _fields = mock_fields(&mut server).await;
    let update = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({ "jira": connection(&server), "fields": [], "presets": {} }),
    );

    run(&path, &["set", "field", "ENG-1", "Epic Link", "ENG-9"])
        .await
        .unwrap();
    run(&path, &["set", "field", "ENG-1", "Nope", "x"])
        .await
        .unwrap();

    update.assert_async().await;
}

#[tokio::test]
async fn test_set_status_by_target_name() {
    let mut server = mockito::Server::new_async().await;
    let _transitions = server
        .mock("GET", "/rest/api/2/issue/ENG-1/transitions")
        .with_status(200)
        .with_body(
            json!({
                "transitions": [
                    { "id": "11", "name": "Start Progress", "to": { "name": "In Progress" } },
                    { "id": "31", "name": "Close", "to": { "name": "Done" } }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let transition = server
        .mock("POST", "/rest/api/2/issue/ENG-1/transitions")
        .match_body(Matcher::Json(json!({ "transition": { "id": "31" } })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({ "jira": connection(&server), "fields": [], "presets": {} }),
    );

    run(&path, &["set", "status", "ENG-1", "done"]).await.unwrap();

    transition.assert_async().await;
}

#[tokio::test]
async fn test_set_assignee_me() {
    let mut server = mockito::Server::new_async().await;
    let _myself = server
        .mock("GET", "/rest/api/2/myself")
        .with_status(200)
        .with_body(r#"{"accountId":"abc-123","displayName":"Alice"}"#)
        .create_async()
        .await;
    let assign = server
        .mock("PUT", "/rest/api/2/issue/ENG-1/assignee")
        .match_body(Matcher::Json(json!({ "accountId": "abc-123" })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &json!({ "jira": connection(&server), "fields": [], "presets": {} }),
    );

    run(&path, &["set", "assignee", "ENG-1", "me"]).await.unwrap();

    assign.assert_async().await;
}
