/*
[INPUT]:  Webhook request schema and serde requirements
[OUTPUT]: Typed request structs for import_task and create_task actions
[POS]:    Data layer - outbound webhook payloads
[UPDATE]: When the webhook request schema changes
*/

use serde::{Deserialize, Serialize};

use super::enums::WebhookAction;
use super::models::Attachment;

/// Body posted to the webhook; the `action` tag selects the operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WebhookRequest {
    ImportTask(ImportTaskRequest),
    CreateTask(CreateTaskRequest),
}

impl WebhookRequest {
    pub fn action(&self) -> WebhookAction {
        match self {
            WebhookRequest::ImportTask(_) => WebhookAction::ImportTask,
            WebhookRequest::CreateTask(_) => WebhookAction::CreateTask,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportTaskRequest {
    #[serde(rename = "taskId")]
    pub task_id: String,
}

impl ImportTaskRequest {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(rename = "taskData")]
    pub task_data: CreateTaskData,
}

/// Fields of the task to create. Names are snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskData {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_request_wire_shape() {
        let request = WebhookRequest::ImportTask(ImportTaskRequest::new("GLAS30-28922"));
        let value = serde_json::to_value(&request).expect("serialize import request");
        assert_eq!(
            value,
            serde_json::json!({"action": "import_task", "taskId": "GLAS30-28922"})
        );
        assert_eq!(request.action(), WebhookAction::ImportTask);
    }

    #[test]
    fn test_create_request_wire_shape_omits_empty_optionals() {
        let request = WebhookRequest::CreateTask(CreateTaskRequest {
            task_data: CreateTaskData {
                project_key: "GLAS30".to_string(),
                summary: "Clone - Example".to_string(),
                description: "body".to_string(),
                issue_type: "Story".to_string(),
                assignee: None,
                priority: Some("Medium".to_string()),
                labels: None,
                components: Some(vec!["UI".to_string()]),
                attachments: Vec::new(),
            },
        });

        let value = serde_json::to_value(&request).expect("serialize create request");
        assert_eq!(
            value,
            serde_json::json!({
                "action": "create_task",
                "taskData": {
                    "project_key": "GLAS30",
                    "summary": "Clone - Example",
                    "description": "body",
                    "issue_type": "Story",
                    "priority": "Medium",
                    "components": ["UI"]
                }
            })
        );
    }
}
