/*
[INPUT]:  Imported Task (shared, read-only), user edits, chosen local files
[OUTPUT]: Clone draft state and validated ClonePayload for submission
[POS]:    Task editor - second step of the clone flow
[UPDATE]: When draft fields, defaults, or submit validation change
*/

use std::sync::Arc;

use task_cloner_adapter::{Attachment, CreateTaskData, Task};
use tracing::{debug, info};

use crate::attachments::{AttachmentAction, LocalFile, remove_by_id, synthesize_attachment};
use crate::error::FlowError;
use crate::notice::Notices;
use crate::text_field::TextField;

pub const CLONE_SUMMARY_PREFIX: &str = "Clone - ";
pub const DEFAULT_ISSUE_TYPE: &str = "Story";
pub const DEFAULT_PRIORITY: &str = "Medium";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Empty,
    Editing,
    Submitting,
}

/// What the editor asks its host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    None,
    Submit(ClonePayload),
    Attachment(AttachmentAction),
}

/// Editable copy of an imported task.
#[derive(Debug, Clone, PartialEq)]
pub struct CloneDraft {
    pub summary: TextField,
    pub description: TextField,
    pub attachments: Vec<Attachment>,
    pub project_key: String,
    pub issue_type: String,
    pub priority: String,
}

impl CloneDraft {
    pub fn from_task(task: &Task, copy_attachments: bool) -> Self {
        Self {
            summary: TextField::with_value(format!("{CLONE_SUMMARY_PREFIX}{}", task.summary)),
            description: TextField::with_value(task.description.clone()),
            attachments: if copy_attachments {
                task.attachments.clone()
            } else {
                Vec::new()
            },
            project_key: task.project_key.clone(),
            issue_type: task
                .issue_type
                .clone()
                .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
            priority: task
                .priority
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        }
    }
}

/// Validated draft handed to the flow controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ClonePayload {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub priority: String,
    pub attachments: Vec<Attachment>,
    pub assignee: Option<String>,
    pub labels: Option<Vec<String>>,
    pub components: Option<Vec<String>>,
}

impl ClonePayload {
    pub fn into_task_data(self) -> CreateTaskData {
        CreateTaskData {
            project_key: self.project_key,
            summary: self.summary,
            description: self.description,
            issue_type: self.issue_type,
            assignee: self.assignee,
            priority: Some(self.priority),
            labels: self.labels,
            components: self.components,
            attachments: self.attachments,
        }
    }
}

#[derive(Debug, Default)]
pub struct TaskEditor {
    original: Option<Arc<Task>>,
    draft: Option<CloneDraft>,
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-seed the draft when the held task is a different one. Returns
    /// whether the draft was replaced.
    pub fn sync_with(&mut self, task: Option<&Arc<Task>>, copy_attachments: bool) -> bool {
        let unchanged = match (&self.original, task) {
            (Some(held), Some(incoming)) => Arc::ptr_eq(held, incoming),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.original = task.cloned();
        self.draft = task.map(|task| CloneDraft::from_task(task, copy_attachments));
        debug!(task_id = ?self.original.as_ref().map(|t| t.id.as_str()), "editor re-seeded");
        true
    }

    pub fn state(&self, create_in_flight: bool) -> EditorState {
        match (&self.draft, create_in_flight) {
            (None, _) => EditorState::Empty,
            (Some(_), true) => EditorState::Submitting,
            (Some(_), false) => EditorState::Editing,
        }
    }

    pub fn original(&self) -> Option<&Arc<Task>> {
        self.original.as_ref()
    }

    pub fn draft(&self) -> Option<&CloneDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut CloneDraft> {
        self.draft.as_mut()
    }

    pub fn copy_summary_from_original(&mut self, notices: &Notices) -> bool {
        let (Some(original), Some(draft)) = (&self.original, &mut self.draft) else {
            return false;
        };
        draft.summary.set_value(original.summary.clone());
        notices.success("Summary Copied", "Original summary copied to clone");
        true
    }

    pub fn copy_description_from_original(&mut self, notices: &Notices) -> bool {
        let (Some(original), Some(draft)) = (&self.original, &mut self.draft) else {
            return false;
        };
        draft.description.set_value(original.description.clone());
        notices.success("Description Copied", "Original description copied to clone");
        true
    }

    /// Insert dropped text into the description at its caret.
    pub fn drop_text(&mut self, text: &str) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        if text.is_empty() {
            return false;
        }
        draft.description.insert_str(text);
        debug!(chars = text.chars().count(), "text dropped into description");
        true
    }

    pub fn add_attachment(&mut self, file: &LocalFile, notices: &Notices) -> Option<Attachment> {
        let draft = self.draft.as_mut()?;
        let attachment = synthesize_attachment(file);
        draft.attachments.push(attachment.clone());
        info!(name = %file.name, size = %attachment.size, "attachment added");
        notices.success(
            "Attachment Added",
            format!("{} will be uploaded with the cloned task", file.name),
        );
        Some(attachment)
    }

    pub fn remove_attachment(&mut self, id: &str) -> bool {
        match self.draft.as_mut() {
            Some(draft) => remove_by_id(&mut draft.attachments, id),
            None => false,
        }
    }

    /// Validate the draft and build the payload. Blank summaries never
    /// leave the editor.
    pub fn submit(&self, notices: &Notices) -> Result<ClonePayload, FlowError> {
        let (Some(original), Some(draft)) = (&self.original, &self.draft) else {
            return Err(FlowError::NoTask);
        };

        let summary = draft.summary.value().trim();
        if summary.is_empty() {
            notices.error("Summary Required", "Please enter a summary for the cloned task");
            return Err(FlowError::Validation("summary must not be empty".to_string()));
        }

        Ok(ClonePayload {
            project_key: draft.project_key.clone(),
            summary: summary.to_string(),
            description: draft.description.value().to_string(),
            issue_type: draft.issue_type.clone(),
            priority: draft.priority.clone(),
            attachments: draft.attachments.clone(),
            assignee: (!original.assignee.is_empty()).then(|| original.assignee.clone()),
            labels: original.labels.clone(),
            components: original.components.clone(),
        })
    }
}
