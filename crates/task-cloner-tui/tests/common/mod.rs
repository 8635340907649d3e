/*
[INPUT]:  Scripted backend outcomes and temp directories
[OUTPUT]: Shared fixtures for flow and CLI integration tests
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use task_cloner::{FlowController, Notices};
use task_cloner_adapter::backend::mock::sample_task;
use task_cloner_adapter::{Backend, ClonerError, CreateResponse, CreateTaskData, Result, Task};

/// What the scripted backend answers to a create request.
#[derive(Debug, Clone, Copy)]
pub enum CreateOutcome {
    Succeed,
    Unauthorized,
    ServerError,
}

/// Backend whose import always succeeds and whose create follows the script.
/// Counts every call so tests can assert that a reset touched nothing.
pub struct ScriptedBackend {
    create_outcome: CreateOutcome,
    pub imports: AtomicUsize,
    pub creates: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(create_outcome: CreateOutcome) -> Self {
        Self {
            create_outcome,
            imports: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.imports.load(Ordering::SeqCst),
            self.creates.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn import_task(&self, task_id: &str) -> Result<Task> {
        self.imports.fetch_add(1, Ordering::SeqCst);
        if task_id == "MISSING-1" {
            return Err(ClonerError::NotFound {
                task_id: task_id.to_string(),
            });
        }
        Ok(sample_task(task_id))
    }

    async fn create_task(&self, task_data: &CreateTaskData) -> Result<CreateResponse> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        match self.create_outcome {
            CreateOutcome::Succeed => Ok(CreateResponse {
                success: true,
                new_task_id: Some(format!("{}-10001", task_data.project_key)),
                url: Some(format!(
                    "https://example.atlassian.net/browse/{}-10001",
                    task_data.project_key
                )),
                message: Some("Task cloned successfully".to_string()),
                error: None,
            }),
            CreateOutcome::Unauthorized => Err(ClonerError::Authentication {
                message: "token expired".to_string(),
            }),
            CreateOutcome::ServerError => Err(ClonerError::Api {
                code: 502,
                message: "bad gateway".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn controller(backend: Arc<dyn Backend>) -> FlowController {
    FlowController::new(backend, Notices::new(Duration::from_secs(4)))
        .with_settle_delay(Duration::ZERO)
}

/// Write `content` as `config.yaml` inside `dir`.
pub fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).expect("write config");
    path
}
