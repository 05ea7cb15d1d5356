// ABOUTME: Typed helpers for the Jira endpoints used by the CLI
// ABOUTME: Every helper is a thin wrapper over request/agile_request

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::types::*;
use crate::{JiraClient, RequestOptions, Result};

impl JiraClient {
    /// All system and custom fields known to the server
    pub async fn list_fields(&self) -> Result<Vec<Field>> {
        self.request("/field", RequestOptions::get()).await
    }

    pub async fn myself(&self) -> Result<User> {
        self.request("/myself", RequestOptions::get()).await
    }

    pub async fn get_issue(&self, key: &str, fields: &[String]) -> Result<Issue> {
        let mut options = RequestOptions::get();
        if !fields.is_empty() {
            options = options.query("fields", fields.join(","));
        }
        self.request(&format!("/issue/{key}"), options).await
    }

    pub async fn search(
        &self,
        jql: &str,
        max_results: u32,
        fields: &[String],
    ) -> Result<SearchResult> {
        let mut options = RequestOptions::get()
            .query("jql", jql)
            .query("maxResults", max_results.to_string());
        if !fields.is_empty() {
            options = options.query("fields", fields.join(","));
        }
        self.request("/search", options).await
    }

    pub async fn create_issue(&self, fields: Value) -> Result<CreatedIssue> {
        self.request("/issue", RequestOptions::post(json!({ "fields": fields })))
            .await
    }

    pub async fn update_issue_fields(&self, key: &str, fields: Value) -> Result<()> {
        self.request(
            &format!("/issue/{key}"),
            RequestOptions::put(json!({ "fields": fields })),
        )
        .await
    }

    pub async fn add_comment(&self, key: &str, body: &str) -> Result<Comment> {
        self.request(
            &format!("/issue/{key}/comment"),
            RequestOptions::post(json!({ "body": body })),
        )
        .await
    }

    pub async fn list_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let transitions: Transitions = self
            .request(&format!("/issue/{key}/transitions"), RequestOptions::get())
            .await?;
        Ok(transitions.transitions)
    }

    pub async fn transition_issue(&self, key: &str, transition_id: &str) -> Result<()> {
        self.request(
            &format!("/issue/{key}/transitions"),
            RequestOptions::post(json!({ "transition": { "id": transition_id } })),
        )
        .await
    }

    pub async fn find_users(&self, query: &str) -> Result<Vec<User>> {
        // Cloud reads `query`, Server/DC reads `username`
        self.request(
            "/user/search",
            RequestOptions::get()
                .query("query", query)
                .query("username", query),
        )
        .await
    }

    pub async fn assign_issue(&self, key: &str, user: &User) -> Result<()> {
        let body = match (&user.account_id, &user.name) {
            (Some(account_id), _) => json!({ "accountId": account_id }),
            (None, Some(name)) => json!({ "name": name }),
            (None, None) => json!({ "name": Value::Null }),
        };
        self.request(&format!("/issue/{key}/assignee"), RequestOptions::put(body))
            .await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.request("/project", RequestOptions::get()).await
    }

    pub async fn get_project(&self, key: &str) -> Result<Project> {
        self.request(&format!("/project/{key}"), RequestOptions::get())
            .await
    }

    pub async fn list_boards(&self, project: &str) -> Result<Vec<Board>> {
        self.agile_pages(
            "/board",
            RequestOptions::get().query("projectKeyOrId", project),
        )
        .await
    }

    pub async fn list_sprints(&self, board_id: u64, state: &str) -> Result<Vec<Sprint>> {
        self.agile_pages(
            &format!("/board/{board_id}/sprint"),
            RequestOptions::get().query("state", state),
        )
        .await
    }

    /// Every value of a paged agile listing, following `startAt` until the
    /// server reports the last page
    async fn agile_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Vec<T>> {
        let mut values = Vec::new();
        loop {
            let page: Page<T> = self
                .agile_request(
                    path,
                    options.clone().query("startAt", values.len().to_string()),
                )
                .await?;
            let done = page.is_last || page.values.is_empty();
            values.extend(page.values);
            if done {
                return Ok(values);
            }
            log::debug!("{} has more than {} values, fetching next page", path, values.len());
        }
    }

    pub async fn sprint_issues(&self, sprint_id: u64, fields: &[String]) -> Result<SearchResult> {
        let mut options = RequestOptions::get();
        if !fields.is_empty() {
            options = options.query("fields", fields.join(","));
        }
        self.agile_request(&format!("/sprint/{sprint_id}/issue"), options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;
    use crate::{JiraError, User};
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_fields() {
        let mut server = mock_jira_server().await;
        let _mock = server
            .mock("GET", "/rest/api/2/field")
            .with_status(200)
            .with_body(mock_fields_response().to_string())
            .create_async()
            .await;

        let fields = client_for(&server).list_fields().await.unwrap();
        let story_points = fields.iter().find(|f| f.name == "Story Points").unwrap();
        assert_eq!(story_points.api_key(), "customfield_10016");
        assert_eq!(story_points.schema_type(), Some("number"));
    }

    #[tokio::test]
    async fn test_search_passes_jql_and_fields() {
        let mut server = mock_jira_server().await;
        let mock = server
            .mock("GET", Matcher::Regex(r"^/rest/api/2/search".to_string()))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("jql".to_string(), "assignee = currentUser()".to_string()),
                Matcher::UrlEncoded("maxResults".to_string(), "50".to_string()),
                Matcher::UrlEncoded(
                    "fields".to_string(),
                    "summary,customfield_10016".to_string(),
                ),
            ]))
            .with_status(200)
            .with_body(mock_search_response().to_string())
            .create_async()
            .await;

        let result = client_for(&server)
            .search(
                "assignee = currentUser()",
                50,
                &["summary".to_string(), "customfield_10016".to_string()],
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.total, 1);
        assert_eq!(result.issues[0].key, "ENG-1");
    }

    #[tokio::test]
    async fn test_create_issue_wraps_fields() {
        let mut server = mock_jira_server().await;
        let mock = server
            .mock("POST", "/rest/api/2/issue")
            .match_body(Matcher::Json(json!({
                "fields": { "project": { "key": "ENG" }, "summary": "New" }
            })))
            .with_status(201)
            .with_body(json!({ "id": "10002", "key": "ENG-2" }).to_string())
            .create_async()
            .await;

        let created = client_for(&server)
            .create_issue(json!({ "project": { "key": "ENG" }, "summary": "New" }))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(created.key, "ENG-2");
    }

    #[tokio::test]
    async fn test_transitions_round_trip() {
        let mut server = mock_jira_server().await;
        let _mock = server
            .mock("GET", "/rest/api/2/issue/ENG-1/transitions")
            .with_status(200)
            .with_body(mock_transitions_response().to_string())
            .create_async()
            .await;
        let post = server
            .mock("POST", "/rest/api/2/issue/ENG-1/transitions")
            .match_body(Matcher::Json(json!({ "transition": { "id": "31" } })))
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        let transitions = client.list_transitions("ENG-1").await.unwrap();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[1].to.name, "Done");

        client.transition_issue("ENG-1", "31").await.unwrap();
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_assign_prefers_account_id() {
        let mut server = mock_jira_server().await;
        let mock = server
            .mock("PUT", "/rest/api/2/issue/ENG-1/assignee")
            .match_body(Matcher::Json(json!({ "accountId": "abc" })))
            .with_status(204)
            .create_async()
            .await;

        let user = User {
            account_id: Some("abc".to_string()),
            name: Some("alice".to_string()),
            display_name: "Alice".to_string(),
            email_address: None,
        };
        client_for(&server).assign_issue("ENG-1", &user).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_boards_and_sprints_use_agile_api() {
        let mut server = mock_jira_server().await;
        let _mock = server
            .mock("GET", Matcher::Regex(r"^/rest/agile/1\.0/board".to_string()))
            .match_query(Matcher::UrlEncoded(
                "projectKeyOrId".to_string(),
                "ENG".to_string(),
            ))
            .with_status(200)
            .with_body(mock_boards_response().to_string())
            .create_async()
            .await;

        let boards = client_for(&server).list_boards("ENG").await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].id, 7);
        assert_eq!(boards[0].board_type.as_deref(), Some("scrum"));
    }

    #[tokio::test]
    async fn test_sprints_follow_every_page() {
        let mut server = mock_jira_server().await;
        let first = server
            .mock("GET", "/rest/agile/1.0/board/7/sprint")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".to_string(), "active,future".to_string()),
                Matcher::UrlEncoded("startAt".to_string(), "0".to_string()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "startAt": 0,
                    "isLast": false,
                    "values": [
                        { "id": 1, "name": "Sprint 1", "state": "active" },
                        { "id": 2, "name": "Sprint 2", "state": "future" }
                    ]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/rest/agile/1.0/board/7/sprint")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".to_string(), "active,future".to_string()),
                Matcher::UrlEncoded("startAt".to_string(), "2".to_string()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "startAt": 2,
                    "isLast": true,
                    "values": [ { "id": 3, "name": "Sprint 3", "state": "future" } ]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let sprints = client_for(&server)
            .list_sprints(7, "active,future")
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        let ids: Vec<u64> = sprints.iter().map(|sprint| sprint.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_paging_stops_on_empty_page() {
        let mut server = mock_jira_server().await;
        let mock = server
            .mock("GET", "/rest/agile/1.0/board")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"isLast":false,"values":[]}"#)
            .expect(1)
            .create_async()
            .await;

        let boards = client_for(&server).list_boards("ENG").await.unwrap();

        mock.assert_async().await;
        assert!(boards.is_empty());
    }

    #[tokio::test]
    async fn test_get_project() {
        let mut server = mock_jira_server().await;
        let _mock = server
            .mock("GET", "/rest/api/2/project/ENG")
            .with_status(200)
            .with_body(mock_project_response().to_string())
            .create_async()
            .await;

        let project = client_for(&server).get_project("ENG").await.unwrap();
        assert_eq!(project.name, "Engineering");
        assert_eq!(project.lead.unwrap().display_name, "Alice");
        assert_eq!(project.issue_types.len(), 3);
        assert!(project.issue_types[2].subtask);
    }

    #[tokio::test]
    async fn test_get_project_not_found() {
        let mut server = mock_jira_server().await;
        let _mock = server
            .mock("GET", "/rest/api/2/project/NOPE")
            .with_status(404)
            .with_body(
                json!({ "errorMessages": ["No project could be found with key 'NOPE'."] })
                    .to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server).get_project("NOPE").await.unwrap_err();
        match err {
            JiraError::NotFound(message) => assert!(message.contains("NOPE")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }
}
