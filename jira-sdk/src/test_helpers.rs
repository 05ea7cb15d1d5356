// ABOUTME: Test helper utilities for mocking Jira API responses and server
// ABOUTME: Provides mockito-based helpers for unit testing API interactions

use crate::JiraClient;
use mockito::{Server, ServerGuard};
use serde_json::json;

pub async fn mock_jira_server() -> ServerGuard {
    Server::new_async().await
}

/// Client pointed at the mock server with `user`/`secret` basic auth
pub fn client_for(server: &ServerGuard) -> JiraClient {
    JiraClient::from_connection(&json!({
        "protocol": "http",
        "host": server.host_with_port(),
        "username": "user",
        "password": "secret"
    }))
    .expect("mock connection should be valid")
}

pub fn mock_fields_response() -> serde_json::Value {
    json!([
        {
            "id": "summary",
            "key": "summary",
            "name": "Summary",
            "custom": false,
            "schema": { "type": "string", "system": "summary" }
        },
        {
            "id": "customfield_10016",
            "key": "customfield_10016",
            "name": "Story Points",
            "custom": true,
            "schema": {
                "type": "number",
                "custom": "com.atlassian.jira.plugin.system.customfieldtypes:float",
                "customId": 10016
            }
        },
        {
            "id": "customfield_10014",
            "key": "customfield_10014",
            "name": "Epic Link",
            "custom": true,
            "schema": {
                "type": "array",
                "items": "string",
                "custom": "com.pyxis.greenhopper.jira:gh-epic-link",
                "customId": 10014
            }
        },
        {
            "id": "issuekey",
            "key": "issuekey",
            "name": "Key",
            "custom": false
        }
    ])
}

pub fn mock_issue_response() -> serde_json::Value {
    json!({
        "id": "10001",
        "key": "ENG-1",
        "fields": {
            "summary": "Fix login race condition",
            "description": "Users are logged out when two tabs refresh at once.",
            "status": {
                "name": "In Progress",
                "statusCategory": { "key": "indeterminate", "name": "In Progress" }
            },
            "issuetype": { "id": "1", "name": "Bug" },
            "priority": { "name": "High" },
            "assignee": { "accountId": "abc", "displayName": "Alice" },
            "reporter": { "accountId": "def", "displayName": "Bob" },
            "created": "2024-01-15T10:30:00.000+0000",
            "updated": "2024-01-16T14:45:00.000+0000",
            "customfield_10016": 5.0
        }
    })
}

pub fn mock_search_response() -> serde_json::Value {
    json!({
        "startAt": 0,
        "maxResults": 50,
        "total": 1,
        "issues": [mock_issue_response()]
    })
}

pub fn mock_project_response() -> serde_json::Value {
    json!({
        "id": "10000",
        "key": "ENG",
        "name": "Engineering",
        "projectTypeKey": "software",
        "lead": { "accountId": "abc", "displayName": "Alice" },
        "issueTypes": [
            { "id": "1", "name": "Bug", "subtask": false },
            { "id": "2", "name": "Story", "subtask": false },
            { "id": "3", "name": "Sub-task", "subtask": true }
        ]
    })
}

pub fn mock_transitions_response() -> serde_json::Value {
    json!({
        "transitions": [
            { "id": "11", "name": "Start progress", "to": { "name": "In Progress" } },
            { "id": "31", "name": "Done", "to": { "name": "Done" } }
        ]
    })
}

pub fn mock_boards_response() -> serde_json::Value {
    json!({
        "isLast": true,
        "values": [ { "id": 7, "name": "ENG board", "type": "scrum" } ]
    })
}

pub fn mock_sprints_response() -> serde_json::Value {
    json!({
        "isLast": true,
        "values": [
            {
                "id": 42,
                "name": "Sprint 12",
                "state": "active",
                "startDate": "2024-01-08T09:00:00.000Z",
                "endDate": "2024-01-22T09:00:00.000Z"
            },
            { "id": 43, "name": "Sprint 13", "state": "future" }
        ]
    })
}

pub fn mock_not_found_response() -> serde_json::Value {
    json!({
        "errorMessages": ["Issue does not exist or you do not have permission to see it."],
        "errors": {}
    })
}
