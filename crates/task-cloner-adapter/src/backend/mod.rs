/*
[INPUT]:  Task identifiers and create payloads from the application layer
[OUTPUT]: Backend capability trait with mock and webhook implementations
[POS]:    Backend layer - data access seam injected at startup
[UPDATE]: When adding backend implementations or operations
*/

pub mod mock;
pub mod webhook;

use async_trait::async_trait;

use crate::http::Result;
use crate::types::{CreateResponse, CreateTaskData, Task};

pub use mock::{MockBackend, MockBackendConfig};
pub use webhook::{RetryPolicy, WebhookBackend};

/// Data access for importing and creating tasks.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the task identified by `task_id`.
    async fn import_task(&self, task_id: &str) -> Result<Task>;

    /// Create a task. A returned response always has `success == true`;
    /// reported failures come back as `Err`.
    async fn create_task(&self, task_data: &CreateTaskData) -> Result<CreateResponse>;

    /// Short label for logs and the status bar.
    fn name(&self) -> &'static str;
}
