/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for task-cloner-adapter tests

use task_cloner_adapter::{ClientConfig, CreateTaskData, WebhookClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `/webhook` on the mock server
pub fn webhook_client(server: &MockServer) -> WebhookClient {
    WebhookClient::with_config(ClientConfig::default(), &format!("{}/webhook", server.uri()))
        .expect("client init")
}

/// Mock bearer token for testing
pub fn mock_auth_token() -> String {
    "test-token-0123456789".to_string()
}

#[allow(dead_code)]
pub fn sample_task_json(task_id: &str) -> serde_json::Value {
    let project = task_id.split('-').next().unwrap_or("PROJECT");
    serde_json::json!({
        "id": task_id,
        "summary": format!("Example task: {task_id}"),
        "description": "first line\nsecond line",
        "project": project,
        "assignee": "john.doe@example.com",
        "status": "In Progress",
        "attachments": [
            {"id": "1", "name": "requirements.pdf", "size": "1.2 MB", "url": "#", "mimeType": "application/pdf"}
        ],
        "issueType": "Bug",
        "priority": "High",
        "labels": ["backend"],
        "components": ["API"],
        "created": "2025-03-01T10:00:00Z",
        "updated": "2025-03-02T10:00:00Z"
    })
}

#[allow(dead_code)]
pub fn sample_create_data(summary: &str) -> CreateTaskData {
    CreateTaskData {
        project_key: "GLAS30".to_string(),
        summary: summary.to_string(),
        description: "cloned body".to_string(),
        issue_type: "Story".to_string(),
        assignee: Some("john.doe@example.com".to_string()),
        priority: Some("Medium".to_string()),
        labels: Some(vec!["frontend".to_string()]),
        components: None,
        attachments: Vec::new(),
    }
}
