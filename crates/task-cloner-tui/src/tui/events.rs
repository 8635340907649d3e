/*
[INPUT]:  Crossterm key and paste events
[OUTPUT]: Focus changes, field edits, and flow operations on AppState
[POS]:    TUI event routing
[UPDATE]: When keybindings or paste routing change
*/

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use task_cloner::FlowError;
use task_cloner::editor::{EditorAction, EditorState};
use task_cloner::notifier::NotifierAction;
use task_cloner::text_field::TextField;

use super::app::{AppState, Focus, Tab};

/// Handles one terminal event.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) async fn handle_event(app: &mut AppState, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key).await,
        Event::Paste(text) => {
            handle_paste(app, &text).await;
            false
        }
        _ => false,
    }
}

async fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return true;
    }

    if app.add_prompt.is_some() {
        handle_prompt_key(app, key).await;
        return false;
    }

    if app.notifier.is_some() {
        let action = notifier_action_for(key.code);
        app.apply_notifier_action(action).await;
        return false;
    }

    match key.code {
        KeyCode::F(1) => {
            app.set_tab(Tab::Clone);
            return false;
        }
        KeyCode::F(2) => {
            app.set_tab(Tab::Logs);
            return false;
        }
        KeyCode::F(3) => {
            app.toggle_advanced();
            return false;
        }
        _ => {}
    }

    if app.current_tab != Tab::Clone {
        return false;
    }

    match key.code {
        KeyCode::Tab => app.cycle_focus(true),
        KeyCode::BackTab => app.cycle_focus(false),
        KeyCode::Char('s') if ctrl => submit(app).await,
        KeyCode::Char('y') if ctrl => copy_from_original(app),
        _ if ctrl => {}
        _ => handle_field_key(app, key).await,
    }
    false
}

fn notifier_action_for(code: KeyCode) -> NotifierAction {
    match code {
        KeyCode::Char('i') => NotifierAction::CopyTaskId,
        KeyCode::Char('u') => NotifierAction::CopyUrl,
        KeyCode::Char('o') => NotifierAction::OpenExternally,
        KeyCode::Char('n') => NotifierAction::CreateAnother,
        KeyCode::Esc => NotifierAction::Close,
        _ => NotifierAction::None,
    }
}

async fn handle_field_key(app: &mut AppState, key: KeyEvent) {
    match app.focus {
        Focus::TaskId => match key.code {
            KeyCode::Enter => app.start_import(),
            KeyCode::Char(c) => app.importer.type_text(&c.to_string()),
            _ => {
                edit_field(app.importer.input_mut(), key.code, false);
            }
        },
        Focus::CopyAttachments => {
            if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                app.importer.toggle_copy_attachments();
            }
        }
        Focus::Summary => {
            if let Some(draft) = app.editor.draft_mut() {
                edit_field(&mut draft.summary, key.code, false);
            }
        }
        Focus::Description => {
            if let Some(draft) = app.editor.draft_mut() {
                edit_field(&mut draft.description, key.code, true);
            }
        }
        Focus::Attachments => handle_attachment_key(app, key.code).await,
    }
}

/// Apply a navigation or editing key. Returns whether the key was consumed.
fn edit_field(field: &mut TextField, code: KeyCode, multiline: bool) -> bool {
    match code {
        KeyCode::Char(c) => field.insert_char(c),
        KeyCode::Enter if multiline => field.insert_char('\n'),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        KeyCode::Up if multiline => field.move_up(),
        KeyCode::Down if multiline => field.move_down(),
        _ => return false,
    }
    true
}

async fn handle_attachment_key(app: &mut AppState, code: KeyCode) {
    let len = app.editor.draft().map_or(0, |draft| draft.attachments.len());
    match code {
        KeyCode::Up => app.draft_attachments.select_prev(),
        KeyCode::Down => app.draft_attachments.select_next(len),
        KeyCode::Char('a') if !app.draft_attachments.read_only => {
            app.add_prompt = Some(TextField::new());
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let action = app
                .editor
                .draft()
                .and_then(|draft| app.draft_attachments.request_remove(&draft.attachments));
            if let Some(action) = action {
                app.apply_editor_action(EditorAction::Attachment(action)).await;
            }
        }
        _ => {}
    }
}

async fn handle_prompt_key(app: &mut AppState, key: KeyEvent) {
    let Some(prompt) = app.add_prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.add_prompt = None,
        KeyCode::Enter => {
            let path = prompt.value().to_string();
            app.add_prompt = None;
            if let Some(action) = app.draft_attachments.request_add(&path) {
                app.apply_editor_action(EditorAction::Attachment(action)).await;
            }
        }
        code => {
            prompt.focus();
            edit_field(prompt, code, false);
        }
    }
}

async fn submit(app: &mut AppState) {
    if app.editor_state() != EditorState::Editing {
        return;
    }
    match app.editor.submit(&app.notices) {
        Ok(payload) => app.apply_editor_action(EditorAction::Submit(payload)).await,
        Err(FlowError::NoTask) => app.status_message = "Import a task first".to_string(),
        Err(err) => app.status_message = err.to_string(),
    }
}

fn copy_from_original(app: &mut AppState) {
    match app.focus {
        Focus::Summary => {
            app.editor.copy_summary_from_original(&app.notices);
        }
        Focus::Description => {
            app.editor.copy_description_from_original(&app.notices);
        }
        _ => {}
    }
}

/// Bracketed paste doubles as drag-and-drop: terminals deliver dropped text
/// and dropped file paths the same way.
async fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(prompt) = app.add_prompt.as_mut() {
        prompt.focus();
        prompt.insert_str(text.trim());
        return;
    }
    if app.notifier.is_some() || app.current_tab != Tab::Clone {
        return;
    }

    match app.focus {
        Focus::TaskId => app.importer.type_text(text),
        Focus::CopyAttachments => {}
        Focus::Summary => {
            if let Some(draft) = app.editor.draft_mut() {
                let single_line: String = text.lines().collect::<Vec<_>>().join(" ");
                draft.summary.insert_str(&single_line);
            }
        }
        Focus::Description => {
            app.editor.drop_text(text);
        }
        Focus::Attachments => {
            for line in text.lines() {
                if let Some(action) = app.draft_attachments.request_add(line) {
                    app.apply_editor_action(EditorAction::Attachment(action)).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use task_cloner::notifier::{ClipboardPort, PortError, UrlOpener};
    use task_cloner::{FlowController, Notices};
    use task_cloner_adapter::MockBackend;

    use crate::tui::runtime::LogBuffer;

    #[derive(Default)]
    struct RecordingClipboard {
        texts: Mutex<Vec<String>>,
    }

    impl ClipboardPort for RecordingClipboard {
        fn set_text(&self, text: &str) -> Result<(), PortError> {
            self.texts.lock().expect("lock").push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        urls: Mutex<Vec<String>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open(&self, url: &str) -> Result<(), PortError> {
            self.urls.lock().expect("lock").push(url.to_string());
            Ok(())
        }
    }

    struct Harness {
        app: AppState,
        clipboard: Arc<RecordingClipboard>,
        opener: Arc<RecordingOpener>,
    }

    fn harness() -> Harness {
        let flow = FlowController::new(Arc::new(MockBackend::instant()), Notices::default())
            .with_settle_delay(Duration::ZERO);
        let clipboard = Arc::new(RecordingClipboard::default());
        let opener = Arc::new(RecordingOpener::default());
        let app = AppState::new(
            flow,
            LogBuffer::handle(16),
            clipboard.clone(),
            opener.clone(),
        );
        Harness {
            app,
            clipboard,
            opener,
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    async fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c))).await;
        }
    }

    async fn wait_until(app: &mut AppState, done: impl Fn(&AppState) -> bool) {
        for _ in 0..200 {
            app.refresh().await;
            if done(app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }

    async fn imported(id: &str) -> Harness {
        let mut h = harness();
        type_str(&mut h.app, id).await;
        handle_event(&mut h.app, key(KeyCode::Enter)).await;
        wait_until(&mut h.app, |app| app.editor.draft().is_some()).await;
        h
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut h = harness();
        assert!(handle_event(&mut h.app, ctrl('q')).await);
        assert!(handle_event(&mut h.app, ctrl('c')).await);
        assert!(!handle_event(&mut h.app, key(KeyCode::Char('q'))).await);
    }

    #[tokio::test]
    async fn test_enter_imports_uppercased_id() {
        let h = imported("glas30-28922").await;
        let task = h.app.editor.original().expect("task");
        assert_eq!(task.id, "GLAS30-28922");
        assert_eq!(h.app.focus, Focus::Summary);
        assert_eq!(
            h.app.editor.draft().expect("draft").summary.value(),
            "Clone - Example task: GLAS30-28922"
        );
    }

    #[tokio::test]
    async fn test_blank_import_raises_notice() {
        let mut h = harness();
        handle_event(&mut h.app, key(KeyCode::Enter)).await;
        wait_until(&mut h.app, |app| {
            app.notices.titles().contains(&"Task ID Required".to_string())
        })
        .await;
        assert!(!h.app.snapshot.importing);
        assert!(h.app.editor.draft().is_none());
    }

    #[tokio::test]
    async fn test_tab_cycles_through_editor_fields() {
        let mut h = imported("A-1").await;
        handle_event(&mut h.app, key(KeyCode::Tab)).await;
        assert_eq!(h.app.focus, Focus::Description);
        handle_event(&mut h.app, key(KeyCode::Tab)).await;
        assert_eq!(h.app.focus, Focus::Attachments);
        handle_event(&mut h.app, key(KeyCode::Tab)).await;
        assert_eq!(h.app.focus, Focus::TaskId);
        handle_event(&mut h.app, key(KeyCode::BackTab)).await;
        assert_eq!(h.app.focus, Focus::Attachments);
    }

    #[tokio::test]
    async fn test_advanced_toggle_adds_copy_attachments_stop() {
        let mut h = harness();
        handle_event(&mut h.app, key(KeyCode::F(3))).await;
        handle_event(&mut h.app, key(KeyCode::Tab)).await;
        assert_eq!(h.app.focus, Focus::CopyAttachments);
        handle_event(&mut h.app, key(KeyCode::Char(' '))).await;
        assert!(!h.app.importer.copy_attachments);
        handle_event(&mut h.app, key(KeyCode::F(3))).await;
        assert_eq!(h.app.focus, Focus::TaskId);
    }

    #[tokio::test]
    async fn test_paste_into_description_inserts_at_caret() {
        let mut h = imported("A-1").await;
        handle_event(&mut h.app, key(KeyCode::Tab)).await;
        let draft = h.app.editor.draft_mut().expect("draft");
        draft.description.set_value("Hello world");
        draft.description.set_caret(Some(5));

        handle_event(&mut h.app, Event::Paste(", dropped".to_string())).await;
        assert_eq!(
            h.app.editor.draft().expect("draft").description.value(),
            "Hello, dropped world"
        );
        assert!(h.app.editor.original().expect("task").description.starts_with("This is"));
    }

    #[tokio::test]
    async fn test_copy_summary_from_original() {
        let mut h = imported("A-1").await;
        handle_event(&mut h.app, key(KeyCode::Backspace)).await;
        handle_event(&mut h.app, ctrl('y')).await;
        assert_eq!(
            h.app.editor.draft().expect("draft").summary.value(),
            "Example task: A-1"
        );
    }

    #[tokio::test]
    async fn test_pasted_file_path_becomes_attachment() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.pdf");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(&[0u8; 1024]).expect("write");
        drop(file);

        let mut h = imported("A-1").await;
        h.app.set_focus(Focus::Attachments);
        handle_event(&mut h.app, Event::Paste(format!("'{}'", path.display()))).await;

        let draft = h.app.editor.draft().expect("draft");
        assert_eq!(draft.attachments.len(), 3);
        let added = draft.attachments.last().expect("added");
        assert_eq!(added.name, "report.pdf");
        assert!(added.id.as_deref().is_some_and(|id| id.starts_with("new-")));
        assert_eq!(h.app.draft_attachments.selected(3), Some(2));
    }

    #[tokio::test]
    async fn test_missing_file_raises_notice() {
        let mut h = imported("A-1").await;
        h.app.set_focus(Focus::Attachments);
        handle_event(&mut h.app, key(KeyCode::Char('a'))).await;
        assert!(h.app.add_prompt.is_some());
        type_str(&mut h.app, "/definitely/not/here.txt").await;
        handle_event(&mut h.app, key(KeyCode::Enter)).await;

        assert!(h.app.add_prompt.is_none());
        assert_eq!(h.app.editor.draft().expect("draft").attachments.len(), 2);
        assert!(h.app.notices.titles().contains(&"Attachment Not Added".to_string()));
    }

    #[tokio::test]
    async fn test_delete_removes_selected_attachment() {
        let mut h = imported("A-1").await;
        h.app.set_focus(Focus::Attachments);
        handle_event(&mut h.app, key(KeyCode::Down)).await;
        handle_event(&mut h.app, key(KeyCode::Char('d'))).await;

        let draft = h.app.editor.draft().expect("draft");
        assert_eq!(draft.attachments.len(), 1);
        assert_eq!(draft.attachments[0].name, "requirements.pdf");
        assert_eq!(h.app.editor.original().expect("task").attachments.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_then_notifier_actions() {
        let mut h = imported("GLAS30-28922").await;
        handle_event(&mut h.app, ctrl('s')).await;
        wait_until(&mut h.app, |app| app.notifier.is_some()).await;

        let task_id = h
            .app
            .notifier
            .as_ref()
            .and_then(|n| n.task_id().map(str::to_string))
            .expect("task id");
        assert!(task_id.starts_with("GLAS30-"));

        handle_event(&mut h.app, key(KeyCode::Char('i'))).await;
        handle_event(&mut h.app, key(KeyCode::Char('u'))).await;
        handle_event(&mut h.app, key(KeyCode::Char('o'))).await;

        let copied = h.clipboard.texts.lock().expect("lock").clone();
        assert_eq!(copied[0], task_id);
        assert!(copied[1].ends_with(&format!("/browse/{task_id}")));
        assert_eq!(h.opener.urls.lock().expect("lock").len(), 1);

        handle_event(&mut h.app, key(KeyCode::Esc)).await;
        assert!(h.app.notifier.is_none());
        assert!(h.app.editor.draft().is_some());
    }

    #[tokio::test]
    async fn test_create_another_resets_form() {
        let mut h = imported("A-1").await;
        handle_event(&mut h.app, ctrl('s')).await;
        wait_until(&mut h.app, |app| app.notifier.is_some()).await;

        handle_event(&mut h.app, key(KeyCode::Char('n'))).await;
        assert!(h.app.notifier.is_none());
        assert!(h.app.editor.draft().is_none());
        assert_eq!(h.app.importer.task_id(), "");
        assert_eq!(h.app.focus, Focus::TaskId);
    }

    #[tokio::test]
    async fn test_blank_summary_blocks_submit() {
        let mut h = imported("A-1").await;
        h.app
            .editor
            .draft_mut()
            .expect("draft")
            .summary
            .set_value("   ");
        handle_event(&mut h.app, ctrl('s')).await;
        h.app.refresh().await;

        assert!(!h.app.snapshot.creating);
        assert!(h.app.notifier.is_none());
        assert!(h.app.notices.titles().contains(&"Summary Required".to_string()));
    }
}
