/*
[INPUT]:  Webhook response schema and serde requirements
[OUTPUT]: Typed import/create response structs
[POS]:    Data layer - inbound webhook payloads
[UPDATE]: When the webhook response schema changes
*/

use serde::{Deserialize, Serialize};

use super::models::Task;

/// Reply to `import_task`. Older workflows put the task under `task`
/// instead of `data`; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportResponse {
    pub fn into_task(self) -> Option<Task> {
        self.data.or(self.task)
    }
}

/// Outcome of a create operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreateResponse {
    /// Best human-readable reason for a failed create.
    pub fn failure_reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "create_task reported failure".to_string())
    }
}
