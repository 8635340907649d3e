/*
[INPUT]:  Local file paths, attachment sequences, list selection
[OUTPUT]: Synthesized draft attachments and upward add/remove actions
[POS]:    Attachment list logic - shared by the editor and the terminal UI
[UPDATE]: When attachment metadata or list interactions change
*/

use std::io;
use std::path::{Path, PathBuf};

use task_cloner_adapter::Attachment;
use uuid::Uuid;

const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// A file chosen on this machine, before it becomes an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let mime_type = guess_mime_type(&name).map(str::to_string);
        Self {
            name,
            size_bytes,
            mime_type,
        }
    }

    /// Stat a regular file and derive its name and MIME type.
    pub async fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        Ok(Self::new(name, metadata.len()))
    }
}

/// `bytes / 1,048,576` with one fractional digit, e.g. `"1.2 MB"`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / BYTES_PER_MEGABYTE)
}

/// Draft attachment for a locally chosen file. The `new-` prefix keeps
/// these ids apart from server-issued ones.
pub fn synthesize_attachment(file: &LocalFile) -> Attachment {
    Attachment {
        id: Some(format!("new-{}", Uuid::new_v4())),
        name: file.name.clone(),
        size: format_size(file.size_bytes),
        url: None,
        mime_type: file.mime_type.clone(),
        author: None,
        created_at: Some(chrono::Utc::now().to_rfc3339()),
    }
}

/// Drop the entry whose id matches. Missing ids leave the list untouched.
pub fn remove_by_id(attachments: &mut Vec<Attachment>, id: &str) -> bool {
    let before = attachments.len();
    attachments.retain(|attachment| attachment.id.as_deref() != Some(id));
    attachments.len() != before
}

fn guess_mime_type(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "xml" => "application/xml",
        "yaml" | "yml" => "application/yaml",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(mime)
}

/// What the list asks its host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentAction {
    Add(PathBuf),
    Remove(String),
}

/// Selection state for one rendered attachment list.
#[derive(Debug, Clone, Default)]
pub struct AttachmentListState {
    pub read_only: bool,
    selected: usize,
}

impl AttachmentListState {
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            selected: 0,
        }
    }

    pub fn selected(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.selected.min(len - 1))
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn request_add(&self, path: &str) -> Option<AttachmentAction> {
        let path = path.trim().trim_matches(|c| c == '"' || c == '\'');
        if self.read_only || path.is_empty() {
            return None;
        }
        Some(AttachmentAction::Add(PathBuf::from(path)))
    }

    /// Removal of the selected entry, if it carries an id.
    pub fn request_remove(&self, attachments: &[Attachment]) -> Option<AttachmentAction> {
        if self.read_only {
            return None;
        }
        let index = self.selected(attachments.len())?;
        attachments[index]
            .id
            .clone()
            .map(AttachmentAction::Remove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn attachment(id: Option<&str>, name: &str) -> Attachment {
        Attachment {
            id: id.map(str::to_string),
            name: name.to_string(),
            size: "0.1 MB".to_string(),
            url: None,
            mime_type: None,
            author: None,
            created_at: None,
        }
    }

    #[rstest]
    #[case(1_258_291, "1.2 MB")]
    #[case(0, "0.0 MB")]
    #[case(1_048_576, "1.0 MB")]
    #[case(104_858, "0.1 MB")]
    #[case(10_485_760, "10.0 MB")]
    fn test_format_size(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(format_size(bytes), expected);
    }

    #[test]
    fn test_synthesized_ids_are_fresh() {
        let file = LocalFile::new("design.PNG", 2_097_152);
        let first = synthesize_attachment(&file);
        let second = synthesize_attachment(&file);

        let id = first.id.clone().expect("id");
        assert!(id.starts_with("new-"));
        assert_ne!(first.id, second.id);
        assert_eq!(first.size, "2.0 MB");
        assert_eq!(first.mime_type.as_deref(), Some("image/png"));
        assert!(first.created_at.is_some());
    }

    #[test]
    fn test_remove_by_id() {
        let mut list = vec![
            attachment(Some("1"), "a"),
            attachment(Some("2"), "b"),
            attachment(None, "c"),
        ];
        assert!(remove_by_id(&mut list, "1"));
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|a| a.id.as_deref() != Some("1")));

        assert!(!remove_by_id(&mut list, "missing"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_read_only_suppresses_actions() {
        let list = vec![attachment(Some("1"), "a")];
        let state = AttachmentListState::read_only();
        assert_eq!(state.request_remove(&list), None);
        assert_eq!(state.request_add("/tmp/file.txt"), None);
    }

    #[test]
    fn test_remove_requires_identifier() {
        let list = vec![attachment(Some("1"), "a"), attachment(None, "b")];
        let mut state = AttachmentListState::default();
        assert_eq!(
            state.request_remove(&list),
            Some(AttachmentAction::Remove("1".to_string()))
        );
        state.select_next(list.len());
        state.select_next(list.len());
        assert_eq!(state.selected(list.len()), Some(1));
        state.select_prev();
        state.select_last(list.len());
        assert_eq!(state.selected(list.len()), Some(1));
        assert_eq!(state.request_remove(&list), None);
        assert_eq!(state.request_remove(&[]), None);
    }

    #[test]
    fn test_request_add_strips_quotes() {
        let state = AttachmentListState::default();
        assert_eq!(
            state.request_add("  '/home/me/My File.pdf' "),
            Some(AttachmentAction::Add(PathBuf::from("/home/me/My File.pdf")))
        );
        assert_eq!(state.request_add("   "), None);
    }

    #[tokio::test]
    async fn test_local_file_from_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(&[b'x'; 2048]).expect("write");
        drop(file);

        let local = LocalFile::from_path(&path).await.expect("stat");
        assert_eq!(local.name, "notes.txt");
        assert_eq!(local.size_bytes, 2048);
        assert_eq!(local.mime_type.as_deref(), Some("text/plain"));

        let err = LocalFile::from_path(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
