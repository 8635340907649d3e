/*
[INPUT]:  FlowController snapshots, importer/editor state, platform ports, log buffer
[OUTPUT]: AppState helpers for TUI rendering and flow control
[POS]:    TUI app state and snapshot management
[UPDATE]: When focus order, tabs, or spawned flow operations change
*/

use std::path::Path;
use std::sync::Arc;

use task_cloner::attachments::{AttachmentAction, AttachmentListState, LocalFile};
use task_cloner::editor::{EditorAction, EditorState};
use task_cloner::notifier::{ClipboardPort, NotifierAction, UrlOpener};
use task_cloner::text_field::TextField;
use task_cloner::{FlowController, FlowSnapshot, Notices, SuccessNotifier, TaskEditor, TaskImporter};
use tracing::{debug, warn};

use super::runtime::LogBufferHandle;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Clone,
    Logs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    TaskId,
    CopyAttachments,
    Summary,
    Description,
    Attachments,
}

pub(super) struct AppState {
    pub(super) flow: FlowController,
    pub(super) notices: Notices,
    pub(super) importer: TaskImporter,
    pub(super) editor: TaskEditor,
    pub(super) draft_attachments: AttachmentListState,
    pub(super) original_attachments: AttachmentListState,
    pub(super) add_prompt: Option<TextField>,
    pub(super) notifier: Option<SuccessNotifier>,
    pub(super) snapshot: FlowSnapshot,
    pub(super) focus: Focus,
    pub(super) current_tab: Tab,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) status_message: String,
    clipboard: Arc<dyn ClipboardPort>,
    opener: Arc<dyn UrlOpener>,
    ticks: usize,
}

impl AppState {
    pub(super) fn new(
        flow: FlowController,
        log_buffer: LogBufferHandle,
        clipboard: Arc<dyn ClipboardPort>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        let notices = flow.notices().clone();
        let mut importer = TaskImporter::new();
        importer.input_mut().focus();
        Self {
            flow,
            notices,
            importer,
            editor: TaskEditor::new(),
            draft_attachments: AttachmentListState::default(),
            original_attachments: AttachmentListState::read_only(),
            add_prompt: None,
            notifier: None,
            snapshot: FlowSnapshot::default(),
            focus: Focus::TaskId,
            current_tab: Tab::Clone,
            log_buffer,
            status_message: "Ready".to_string(),
            clipboard,
            opener,
            ticks: 0,
        }
    }

    pub(super) fn backend_name(&self) -> &'static str {
        self.flow.backend_name()
    }

    pub(super) fn on_tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub(super) fn spinner(&self) -> &'static str {
        SPINNER[self.ticks % SPINNER.len()]
    }

    pub(super) fn status_line(&self) -> String {
        if self.snapshot.importing {
            format!("{} Importing...", self.spinner())
        } else if self.snapshot.creating {
            format!("{} Creating clone...", self.spinner())
        } else {
            self.status_message.clone()
        }
    }

    pub(super) fn editor_state(&self) -> EditorState {
        self.editor.state(self.snapshot.creating)
    }

    /// Pull the latest flow state and re-seed the editor when the task changed.
    pub(super) async fn refresh(&mut self) {
        self.snapshot = self.flow.snapshot().await;

        let reseeded = self
            .editor
            .sync_with(self.snapshot.current_task.as_ref(), self.importer.copy_attachments);
        if reseeded {
            self.draft_attachments = AttachmentListState::default();
            self.original_attachments = AttachmentListState::read_only();
            match self.snapshot.current_task.as_ref() {
                Some(task) => {
                    self.status_message = format!("Editing clone of {}", task.id);
                    self.set_focus(Focus::Summary);
                }
                None => {
                    self.status_message = "Ready".to_string();
                    self.set_focus(Focus::TaskId);
                }
            }
        }

        self.notifier = if self.snapshot.notifier_visible {
            self.snapshot.last_response.clone().map(SuccessNotifier::new)
        } else {
            None
        };
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::TaskId];
        if self.importer.show_advanced {
            order.push(Focus::CopyAttachments);
        }
        if self.editor.draft().is_some() {
            order.extend([Focus::Summary, Focus::Description, Focus::Attachments]);
        }
        order
    }

    pub(super) fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::TaskId => self.importer.input_mut().focus(),
            Focus::Summary => {
                if let Some(draft) = self.editor.draft_mut() {
                    draft.summary.focus();
                }
            }
            Focus::Description => {
                if let Some(draft) = self.editor.draft_mut() {
                    draft.description.focus();
                }
            }
            Focus::CopyAttachments | Focus::Attachments => {}
        }
    }

    pub(super) fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.set_focus(order[next]);
    }

    pub(super) fn toggle_advanced(&mut self) {
        self.importer.toggle_advanced();
        if !self.importer.show_advanced && self.focus == Focus::CopyAttachments {
            self.set_focus(Focus::TaskId);
        }
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    /// Kick off an import in the background; the tick loop picks up the result.
    pub(super) fn start_import(&mut self) {
        if self.snapshot.importing {
            self.status_message = "Import already in progress".to_string();
            return;
        }
        let raw_id = self.importer.task_id().to_string();
        let flow = self.flow.clone();
        // Mark busy now so a second Enter before the next refresh is ignored.
        self.snapshot.importing = true;
        tokio::spawn(async move {
            if let Err(err) = flow.import_task(&raw_id).await {
                debug!(error = %err, "import finished with error");
            }
        });
    }

    pub(super) async fn apply_editor_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::None => {}
            EditorAction::Submit(payload) => {
                if self.snapshot.creating {
                    self.status_message = "Create already in progress".to_string();
                    return;
                }
                let flow = self.flow.clone();
                self.snapshot.creating = true;
                tokio::spawn(async move {
                    if let Err(err) = flow.on_create_clone(payload).await {
                        debug!(error = %err, "create finished with error");
                    }
                });
            }
            EditorAction::Attachment(AttachmentAction::Remove(id)) => {
                if self.editor.remove_attachment(&id) {
                    self.status_message = "Attachment removed".to_string();
                }
            }
            EditorAction::Attachment(AttachmentAction::Add(path)) => {
                self.add_attachment_from_path(&path).await;
            }
        }
    }

    /// Stat the chosen file and append it to the draft.
    async fn add_attachment_from_path(&mut self, path: &Path) {
        match LocalFile::from_path(path).await {
            Ok(file) => {
                if self.editor.add_attachment(&file, &self.notices).is_some() {
                    let len = self.editor.draft().map_or(0, |d| d.attachments.len());
                    self.draft_attachments.select_last(len);
                    self.status_message = format!("Attached {}", file.name);
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot attach file");
                self.notices.error("Attachment Not Added", err.to_string());
            }
        }
    }

    pub(super) async fn apply_notifier_action(&mut self, action: NotifierAction) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };
        match action {
            NotifierAction::None => {}
            NotifierAction::CopyTaskId => {
                notifier.copy_task_id(self.clipboard.as_ref(), &self.notices);
            }
            NotifierAction::CopyUrl => {
                notifier.copy_url(self.clipboard.as_ref(), &self.notices);
            }
            NotifierAction::OpenExternally => {
                notifier.open_externally(self.opener.as_ref(), &self.notices);
            }
            NotifierAction::CreateAnother => {
                self.flow.on_create_another().await;
                self.importer.clear();
                self.refresh().await;
            }
            NotifierAction::Close => {
                self.flow.on_close_notifier().await;
                self.refresh().await;
            }
        }
    }
}
