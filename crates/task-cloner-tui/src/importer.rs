/*
[INPUT]:  Typed task identifier, Backend capability, notices
[OUTPUT]: Imported Task or a classified failure with a user notice
[POS]:    Task importer - first step of the clone flow
[UPDATE]: When identifier rules or import messages change
*/

use task_cloner_adapter::{Backend, ErrorKind, Task};
use tracing::{info, warn};

use crate::error::FlowError;
use crate::notice::Notices;
use crate::text_field::TextField;

pub const EXAMPLE_TASK_ID: &str = "GLAS30-28922";

/// Importer form: one identifier input plus the advanced toggle.
#[derive(Debug, Clone)]
pub struct TaskImporter {
    input: TextField,
    pub copy_attachments: bool,
    pub show_advanced: bool,
}

impl Default for TaskImporter {
    fn default() -> Self {
        Self {
            input: TextField::new(),
            copy_attachments: true,
            show_advanced: false,
        }
    }
}

impl TaskImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &TextField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextField {
        &mut self.input
    }

    /// Typed text is upper-cased as it arrives.
    pub fn type_text(&mut self, text: &str) {
        let upper: String = text
            .chars()
            .filter(|c| !c.is_control())
            .flat_map(char::to_uppercase)
            .collect();
        self.input.insert_str(&upper);
    }

    pub fn set_task_id(&mut self, task_id: &str) {
        self.input.set_value("");
        self.type_text(task_id);
    }

    pub fn task_id(&self) -> &str {
        self.input.value()
    }

    pub fn toggle_copy_attachments(&mut self) {
        self.copy_attachments = !self.copy_attachments;
    }

    pub fn toggle_advanced(&mut self) {
        self.show_advanced = !self.show_advanced;
    }

    pub fn clear(&mut self) {
        self.input.set_value("");
    }
}

/// The identifier as given, or a validation notice and error when blank.
pub fn validate_task_id(raw: &str, notices: &Notices) -> Result<String, FlowError> {
    if raw.trim().is_empty() {
        notices.error(
            "Task ID Required",
            format!("Please enter a valid JIRA task ID (e.g., {EXAMPLE_TASK_ID})"),
        );
        return Err(FlowError::Validation("task id must not be empty".to_string()));
    }
    Ok(raw.to_string())
}

/// Validate and fetch one task, raising the matching notice.
pub async fn import(
    backend: &dyn Backend,
    raw_id: &str,
    notices: &Notices,
) -> Result<Task, FlowError> {
    let task_id = validate_task_id(raw_id, notices)?;
    info!(task_id = %task_id, backend = backend.name(), "importing task");

    match backend.import_task(&task_id).await {
        Ok(task) => {
            info!(task_id = %task.id, attachments = task.attachments.len(), "task imported");
            notices.success(
                "Task Imported Successfully",
                format!("Task {} has been loaded and ready for cloning.", task.id),
            );
            Ok(task)
        }
        Err(err) => {
            warn!(task_id = %task_id, error = %err, "import failed");
            notices.error("Import Failed", import_failure_message(&task_id, err.kind()));
            Err(err.into())
        }
    }
}

pub fn import_failure_message(task_id: &str, kind: ErrorKind) -> String {
    match kind {
        ErrorKind::NotFound => format!("Task {task_id} was not found. Please check the task ID."),
        ErrorKind::Authentication => {
            "The backend rejected the credentials. Check the configured auth token.".to_string()
        }
        ErrorKind::Network => {
            "Could not reach the backend. Check your connection and try again.".to_string()
        }
        _ => "Failed to import task. Please check the task ID and try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use task_cloner_adapter::MockBackend;

    #[test]
    fn test_typing_uppercases() {
        let mut importer = TaskImporter::new();
        importer.type_text("glas30-");
        importer.type_text("28922\n");
        assert_eq!(importer.task_id(), "GLAS30-28922");
        assert!(importer.copy_attachments);
    }

    #[test]
    fn test_blank_id_raises_required_notice() {
        let notices = Notices::default();
        let err = validate_task_id("   ", &notices).unwrap_err();
        assert!(matches!(err, FlowError::Validation(_)));
        assert_eq!(notices.titles(), vec!["Task ID Required".to_string()]);
    }

    #[tokio::test]
    async fn test_import_returns_task_with_same_id() {
        let notices = Notices::default();
        let backend = MockBackend::instant();
        for id in ["GLAS30-28922", "X", "lower-case", "  PAD-1  "] {
            let task = import(&backend, id, &notices).await.expect("import");
            assert_eq!(task.id, id);
        }
        assert_eq!(
            notices.latest().map(|n| n.body),
            Some("Task   PAD-1   has been loaded and ready for cloning.".to_string())
        );
    }

    #[test]
    fn test_failure_messages_are_distinct() {
        let messages = [
            ErrorKind::NotFound,
            ErrorKind::Authentication,
            ErrorKind::Network,
            ErrorKind::Rejected,
        ]
        .map(|kind| import_failure_message("A-1", kind));
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
