/*
[INPUT]:  Task identifiers, create payloads, simulated latency settings
[OUTPUT]: Deterministic sample tasks and synthesized create responses
[POS]:    Backend layer - offline default implementation
[UPDATE]: When the sample task shape or id scheme changes
*/

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info};

use super::Backend;
use crate::http::{ClonerError, Result};
use crate::types::{Attachment, CreateResponse, CreateTaskData, Task};

const DEFAULT_BROWSE_BASE_URL: &str = "https://example.atlassian.net";
const FALLBACK_PROJECT_KEY: &str = "PROJECT";

#[derive(Debug, Clone)]
pub struct MockBackendConfig {
    pub import_delay: Duration,
    pub create_delay: Duration,
    pub browse_base_url: String,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            import_delay: Duration::from_millis(1500),
            create_delay: Duration::from_millis(2000),
            browse_base_url: DEFAULT_BROWSE_BASE_URL.to_string(),
        }
    }
}

/// Backend that never leaves the process.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    config: MockBackendConfig,
}

impl MockBackend {
    pub fn new(config: MockBackendConfig) -> Self {
        Self { config }
    }

    /// No simulated latency; used by tests and headless runs.
    pub fn instant() -> Self {
        Self::new(MockBackendConfig {
            import_delay: Duration::ZERO,
            create_delay: Duration::ZERO,
            ..MockBackendConfig::default()
        })
    }

    pub fn config(&self) -> &MockBackendConfig {
        &self.config
    }

    fn browse_url(&self, task_id: &str) -> String {
        format!(
            "{}/browse/{}",
            self.config.browse_base_url.trim_end_matches('/'),
            task_id
        )
    }
}

/// Text before the first `-`, or the placeholder key when there is no
/// separator or the prefix is empty.
pub fn project_key_for(task_id: &str) -> String {
    match task_id.split_once('-') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
        _ => FALLBACK_PROJECT_KEY.to_string(),
    }
}

/// Sample task returned for any identifier.
pub fn sample_task(task_id: &str) -> Task {
    Task {
        id: task_id.to_string(),
        summary: format!("Example task: {task_id}"),
        description: format!(
            "This is a sample description for task {task_id}.\n\nIt contains multiple lines and formatting that will be cloned."
        ),
        project_key: project_key_for(task_id),
        assignee: "john.doe@example.com".to_string(),
        status: "In Progress".to_string(),
        attachments: vec![
            Attachment {
                id: Some("1".to_string()),
                name: "requirements.pdf".to_string(),
                size: "1.2 MB".to_string(),
                url: Some("#".to_string()),
                mime_type: Some("application/pdf".to_string()),
                author: None,
                created_at: None,
            },
            Attachment {
                id: Some("2".to_string()),
                name: "screenshot.png".to_string(),
                size: "245 KB".to_string(),
                url: Some("#".to_string()),
                mime_type: Some("image/png".to_string()),
                author: None,
                created_at: None,
            },
        ],
        issue_type: Some("Story".to_string()),
        priority: Some("Medium".to_string()),
        labels: Some(vec!["frontend".to_string(), "react".to_string()]),
        components: Some(vec!["UI".to_string(), "Components".to_string()]),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn import_task(&self, task_id: &str) -> Result<Task> {
        if task_id.trim().is_empty() {
            return Err(ClonerError::Validation("task id must not be empty".to_string()));
        }

        debug!(task_id, delay_ms = self.config.import_delay.as_millis() as u64, "mock import");
        if !self.config.import_delay.is_zero() {
            tokio::time::sleep(self.config.import_delay).await;
        }

        Ok(sample_task(task_id))
    }

    async fn create_task(&self, task_data: &CreateTaskData) -> Result<CreateResponse> {
        if task_data.summary.trim().is_empty() {
            return Err(ClonerError::Validation("summary must not be empty".to_string()));
        }

        if !self.config.create_delay.is_zero() {
            tokio::time::sleep(self.config.create_delay).await;
        }

        let suffix: u32 = rand::thread_rng().gen_range(10_000..=99_999);
        let new_task_id = format!("{}-{}", task_data.project_key, suffix);
        let url = self.browse_url(&new_task_id);
        info!(new_task_id = %new_task_id, project = %task_data.project_key, "mock create");

        Ok(CreateResponse {
            success: true,
            new_task_id: Some(new_task_id),
            url: Some(url),
            message: Some("Task cloned successfully".to_string()),
            error: None,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn task_data(project_key: &str, summary: &str) -> CreateTaskData {
        CreateTaskData {
            project_key: project_key.to_string(),
            summary: summary.to_string(),
            description: String::new(),
            issue_type: "Story".to_string(),
            assignee: None,
            priority: None,
            labels: None,
            components: None,
            attachments: Vec::new(),
        }
    }

    #[rstest]
    #[case("GLAS30-28922", "GLAS30")]
    #[case("ABC-1-2", "ABC")]
    #[case("NOSEPARATOR", "PROJECT")]
    #[case("-42", "PROJECT")]
    fn test_project_key_for(#[case] id: &str, #[case] expected: &str) {
        assert_eq!(project_key_for(id), expected);
    }

    #[tokio::test]
    async fn test_import_echoes_identifier() {
        let backend = MockBackend::instant();
        let task = backend.import_task("GLAS30-28922").await.expect("import");
        assert_eq!(task.id, "GLAS30-28922");
        assert_eq!(task.summary, "Example task: GLAS30-28922");
        assert_eq!(task.attachments.len(), 2);
        assert_eq!(task.attachments[0].name, "requirements.pdf");
        assert_eq!(task.attachments[1].size, "245 KB");
    }

    #[tokio::test]
    async fn test_import_keeps_identifier_verbatim() {
        let task = MockBackend::instant()
            .import_task(" GLAS30-28922 ")
            .await
            .expect("import");
        assert_eq!(task.id, " GLAS30-28922 ");
    }

    #[tokio::test]
    async fn test_import_rejects_blank_identifier() {
        let err = MockBackend::instant().import_task("   ").await.unwrap_err();
        assert!(matches!(err, ClonerError::Validation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_import_waits_for_configured_delay() {
        let backend = MockBackend::default();
        let started = tokio::time::Instant::now();
        backend.import_task("A-1").await.expect("import");
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_create_url_uses_same_identifier() {
        let backend = MockBackend::instant();
        let response = backend
            .create_task(&task_data("GLAS30", "Clone - Example"))
            .await
            .expect("create");

        let id = response.new_task_id.expect("new id");
        let (project, suffix) = id.split_once('-').expect("separator");
        assert_eq!(project, "GLAS30");
        assert_eq!(suffix.len(), 5);
        assert!(suffix.parse::<u32>().is_ok_and(|n| (10_000..=99_999).contains(&n)));
        assert_eq!(
            response.url.as_deref(),
            Some(format!("https://example.atlassian.net/browse/{id}").as_str())
        );
        assert_eq!(response.message.as_deref(), Some("Task cloned successfully"));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_summary() {
        let err = MockBackend::instant()
            .create_task(&task_data("GLAS30", "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, ClonerError::Validation(_)));
    }
}
