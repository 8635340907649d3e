/*
[INPUT]:  Webhook task schema and serde requirements
[OUTPUT]: Typed Task and Attachment structs with serialization support
[POS]:    Data layer - shared task shapes for import, edit and create
[UPDATE]: When the task schema changes or new fields are added
*/

use serde::{Deserialize, Serialize};

/// One tracked work item as returned by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "project")]
    pub project_key: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
    #[serde(default, rename = "created", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updated", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A file reference attached to a task or a clone draft.
///
/// `size` is already human readable ("1.2 MB"); no byte count is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, rename = "created", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Attachment {
    /// Only attachments carrying an identifier can be removed individually.
    pub fn is_removable(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_webhook_shape() {
        let raw = r##"{
            "id": "GLAS30-28922",
            "summary": "Example task",
            "description": "line one\nline two",
            "project": "GLAS30",
            "assignee": "john.doe@example.com",
            "status": "In Progress",
            "attachments": [
                {"id": "1", "name": "requirements.pdf", "size": "1.2 MB", "url": "#", "mimeType": "application/pdf"}
            ],
            "issueType": "Story",
            "priority": "Medium",
            "labels": ["frontend"],
            "created": "2025-01-01T00:00:00Z"
        }"##;

        let task: Task = serde_json::from_str(raw).expect("task should parse");
        assert_eq!(task.project_key, "GLAS30");
        assert_eq!(task.issue_type.as_deref(), Some("Story"));
        assert_eq!(task.labels, Some(vec!["frontend".to_string()]));
        assert_eq!(task.components, None);
        assert_eq!(task.created_at.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(task.updated_at, None);
        assert_eq!(task.attachments[0].mime_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_task_tolerates_missing_optional_collections() {
        let raw = r#"{"id": "A-1", "summary": "s", "project": "A"}"#;
        let task: Task = serde_json::from_str(raw).expect("minimal task should parse");
        assert!(task.attachments.is_empty());
        assert!(task.description.is_empty());
        assert!(task.assignee.is_empty());
    }

    #[test]
    fn test_attachment_serialization_skips_absent_fields() {
        let attachment = Attachment {
            id: None,
            name: "notes.txt".to_string(),
            size: "0.1 MB".to_string(),
            url: None,
            mime_type: Some("text/plain".to_string()),
            author: None,
            created_at: None,
        };

        let value = serde_json::to_value(&attachment).expect("serialize attachment");
        assert_eq!(
            value,
            serde_json::json!({"name": "notes.txt", "size": "0.1 MB", "mimeType": "text/plain"})
        );
        assert!(!attachment.is_removable());
    }
}
