/*
[INPUT]:  WebhookClient and retry policy
[OUTPUT]: Backend implementation over the HTTP webhook
[POS]:    Backend layer - networked implementation
[UPDATE]: When retry behavior or webhook actions change
*/

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use super::Backend;
use crate::http::{ClonerError, Result, WebhookClient};
use crate::types::{CreateResponse, CreateTaskData, Task};

/// Bounded exponential backoff for retryable errors
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn delay_for(&self, attempt: u32, err: &ClonerError) -> Duration {
        let hinted = err.retry_delay().map(Duration::from_millis);
        let backoff = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        hinted.unwrap_or(backoff).max(backoff).min(self.max_delay)
    }
}

pub struct WebhookBackend {
    client: WebhookClient,
    retry: RetryPolicy,
}

impl WebhookBackend {
    pub fn new(client: WebhookClient, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    pub fn client(&self) -> &WebhookClient {
        &self.client
    }

    async fn with_retry<T, F, Fut>(&self, action: &'static str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt, &err);
                    attempt += 1;
                    warn!(
                        action,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "webhook call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl Backend for WebhookBackend {
    async fn import_task(&self, task_id: &str) -> Result<Task> {
        if task_id.trim().is_empty() {
            return Err(ClonerError::Validation("task id must not be empty".to_string()));
        }

        let task = self
            .with_retry("import_task", || self.client.import_task(task_id))
            .await?;
        info!(task_id, attachments = task.attachments.len(), "webhook import complete");
        Ok(task)
    }

    async fn create_task(&self, task_data: &CreateTaskData) -> Result<CreateResponse> {
        if task_data.summary.trim().is_empty() {
            return Err(ClonerError::Validation("summary must not be empty".to_string()));
        }

        let response = self
            .with_retry("create_task", || self.client.create_task(task_data))
            .await?;
        info!(new_task_id = ?response.new_task_id, "webhook create complete");
        Ok(response)
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
