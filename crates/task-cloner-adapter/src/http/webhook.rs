/*
[INPUT]:  Task identifiers and create payloads
[OUTPUT]: Imported tasks and create outcomes from the webhook
[POS]:    HTTP layer - import_task and create_task actions
[UPDATE]: When adding webhook actions or changing response handling
*/

use crate::http::{ClonerError, Result, WebhookClient};
use crate::types::{
    CreateResponse, CreateTaskData, CreateTaskRequest, ImportResponse, ImportTaskRequest, Task,
    WebhookRequest,
};

impl WebhookClient {
    /// Fetch a task by identifier
    ///
    /// POST {"action": "import_task", "taskId": ...}
    pub async fn import_task(&self, task_id: &str) -> Result<Task> {
        let request = WebhookRequest::ImportTask(ImportTaskRequest::new(task_id));
        let builder = self.post_json(&request);

        let response: ImportResponse = match self.send_json(builder).await {
            Ok(response) => response,
            Err(ClonerError::Api { code: 404, .. }) => {
                return Err(ClonerError::NotFound {
                    task_id: task_id.to_string(),
                });
            }
            Err(err) => return Err(err),
        };

        if !response.success {
            let message = response
                .error
                .or(response.message)
                .unwrap_or_else(|| "import_task reported failure".to_string());
            if message.to_ascii_lowercase().contains("not found") {
                return Err(ClonerError::NotFound {
                    task_id: task_id.to_string(),
                });
            }
            return Err(ClonerError::Rejected { message });
        }

        response.into_task().ok_or_else(|| {
            ClonerError::InvalidResponse("import_task reply carried no task".to_string())
        })
    }

    /// Create a new task from the supplied fields
    ///
    /// POST {"action": "create_task", "taskData": {...}}
    pub async fn create_task(&self, task_data: &CreateTaskData) -> Result<CreateResponse> {
        let request = WebhookRequest::CreateTask(CreateTaskRequest {
            task_data: task_data.clone(),
        });
        let builder = self.post_json(&request);
        let response: CreateResponse = self.send_json(builder).await?;

        if !response.success {
            return Err(ClonerError::Rejected {
                message: response.failure_reason(),
            });
        }
        if response.new_task_id.is_none() {
            return Err(ClonerError::InvalidResponse(
                "create_task reply carried no newTaskId".to_string(),
            ));
        }

        Ok(response)
    }
}
