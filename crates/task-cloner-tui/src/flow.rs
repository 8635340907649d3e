/*
[INPUT]:  Backend capability, importer/editor output, reset requests
[OUTPUT]: Shared FlowState (task, busy flags, last response, notifier visibility)
[POS]:    Flow controller - single source of truth for the clone flow
[UPDATE]: When flow transitions, busy gating, or cancellation change
*/

use std::sync::Arc;
use std::time::Duration;

use task_cloner_adapter::{Backend, CreateResponse, ErrorKind, Task};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::editor::ClonePayload;
use crate::error::FlowError;
use crate::importer;
use crate::notice::Notices;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
pub struct FlowState {
    pub current_task: Option<Arc<Task>>,
    pub importing: bool,
    pub creating: bool,
    pub last_response: Option<CreateResponse>,
    pub notifier_visible: bool,
    cancel: CancellationToken,
}

/// Point-in-time copy of `FlowState` for rendering.
#[derive(Debug, Clone, Default)]
pub struct FlowSnapshot {
    pub current_task: Option<Arc<Task>>,
    pub importing: bool,
    pub creating: bool,
    pub last_response: Option<CreateResponse>,
    pub notifier_visible: bool,
}

#[derive(Clone, Copy)]
enum Operation {
    Import,
    Create,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::Import => "import",
            Operation::Create => "create",
        }
    }

    fn flag(self, state: &mut FlowState) -> &mut bool {
        match self {
            Operation::Import => &mut state.importing,
            Operation::Create => &mut state.creating,
        }
    }
}

#[derive(Clone)]
pub struct FlowController {
    backend: Arc<dyn Backend>,
    state: Arc<RwLock<FlowState>>,
    notices: Notices,
    settle_delay: Duration,
}

impl FlowController {
    pub fn new(backend: Arc<dyn Backend>, notices: Notices) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(FlowState::default())),
            notices,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn snapshot(&self) -> FlowSnapshot {
        let state = self.state.read().await;
        FlowSnapshot {
            current_task: state.current_task.clone(),
            importing: state.importing,
            creating: state.creating,
            last_response: state.last_response.clone(),
            notifier_visible: state.notifier_visible,
        }
    }

    /// Set the busy flag for `op` and hand out the current reset token.
    async fn begin(&self, op: Operation) -> Result<CancellationToken, FlowError> {
        let mut state = self.state.write().await;
        let flag = op.flag(&mut state);
        if *flag {
            debug!(operation = op.label(), "rejected while busy");
            return Err(FlowError::Busy(op.label()));
        }
        *flag = true;
        Ok(state.cancel.clone())
    }

    async fn finish(&self, op: Operation) {
        let mut state = self.state.write().await;
        *op.flag(&mut state) = false;
    }

    /// Validate, fetch and store a task. The import flag covers the whole
    /// round trip.
    pub async fn import_task(&self, raw_id: &str) -> Result<Arc<Task>, FlowError> {
        let task_id = importer::validate_task_id(raw_id, &self.notices)?;
        let token = self.begin(Operation::Import).await?;

        let result: Result<Arc<Task>, FlowError> = async {
            let task = tokio::select! {
                _ = token.cancelled() => return Err(FlowError::Cancelled),
                fetched = importer::import(self.backend.as_ref(), &task_id, &self.notices) => fetched?,
            };
            self.settle_and_store(task, &token).await
        }
        .await;

        self.finish(Operation::Import).await;
        result
    }

    /// Store a task that was fetched elsewhere, after the settle delay.
    pub async fn on_task_imported(&self, task: Task) -> Result<Arc<Task>, FlowError> {
        let token = self.begin(Operation::Import).await?;
        let result = self.settle_and_store(task, &token).await;
        self.finish(Operation::Import).await;
        result
    }

    async fn settle_and_store(
        &self,
        task: Task,
        token: &CancellationToken,
    ) -> Result<Arc<Task>, FlowError> {
        tokio::select! {
            _ = token.cancelled() => return Err(FlowError::Cancelled),
            _ = tokio::time::sleep(self.settle_delay) => {}
        }

        let mut state = self.state.write().await;
        if token.is_cancelled() {
            return Err(FlowError::Cancelled);
        }
        let task = Arc::new(task);
        state.current_task = Some(Arc::clone(&task));
        state.last_response = None;
        state.notifier_visible = false;
        info!(task_id = %task.id, "task stored");
        Ok(task)
    }

    /// Submit a validated draft. On failure the held task is left as is.
    pub async fn on_create_clone(&self, payload: ClonePayload) -> Result<CreateResponse, FlowError> {
        if self.state.read().await.current_task.is_none() {
            self.notices
                .error("Clone Creation Failed", "Import a task before creating a clone.");
            return Err(FlowError::NoTask);
        }
        let token = self.begin(Operation::Create).await?;

        let result: Result<CreateResponse, FlowError> = async {
            let task_data = payload.into_task_data();
            info!(project = %task_data.project_key, summary = %task_data.summary, "creating clone");
            let response = tokio::select! {
                _ = token.cancelled() => return Err(FlowError::Cancelled),
                created = self.backend.create_task(&task_data) => created?,
            };

            let mut state = self.state.write().await;
            if token.is_cancelled() {
                return Err(FlowError::Cancelled);
            }
            state.last_response = Some(response.clone());
            state.notifier_visible = true;
            Ok(response)
        }
        .await;

        self.finish(Operation::Create).await;

        match &result {
            Ok(response) => {
                let new_id = response.new_task_id.as_deref().unwrap_or_default();
                info!(new_task_id = %new_id, url = ?response.url, "clone created");
                self.notices.success(
                    "Task Cloned Successfully",
                    format!("New task {new_id} has been created"),
                );
            }
            Err(FlowError::Cancelled) => debug!("create cancelled by reset"),
            Err(err) => {
                warn!(error = %err, "clone creation failed");
                self.notices
                    .error("Clone Creation Failed", create_failure_message(err.kind()));
            }
        }
        result
    }

    /// Clear task and response, hide the notifier and cancel in-flight work.
    pub async fn on_create_another(&self) {
        let mut state = self.state.write().await;
        state.cancel.cancel();
        state.cancel = CancellationToken::new();
        state.current_task = None;
        state.last_response = None;
        state.notifier_visible = false;
        info!("flow reset for another clone");
    }

    pub async fn on_close_notifier(&self) {
        self.state.write().await.notifier_visible = false;
    }
}

pub fn create_failure_message(kind: ErrorKind) -> String {
    match kind {
        ErrorKind::Authentication => {
            "The backend rejected the credentials. Check the configured auth token.".to_string()
        }
        ErrorKind::Network => {
            "Could not reach the backend. Check your connection and try again.".to_string()
        }
        ErrorKind::NotFound => "The project for this clone was not found.".to_string(),
        _ => "Failed to create cloned task. Please try again.".to_string(),
    }
}
