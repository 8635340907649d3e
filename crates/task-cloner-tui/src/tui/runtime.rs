/*
[INPUT]:  FlowController, platform ports, log buffer, terminal input events
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::Event as CrosstermEvent;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;

use task_cloner::FlowController;
use task_cloner::notifier::{ClipboardPort, UrlOpener};

use super::app::{AppState, Focus, Tab};
use super::events::handle_event;
use super::terminal::TerminalGuard;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(100);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn handle(capacity: usize) -> LogBufferHandle {
        Arc::new(StdMutex::new(Self::new(capacity)))
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

/// Splits formatter output into lines for the buffer.
pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        self.buffer.lock().expect("log buffer lock").push_line(line);
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let context: Vec<Span> = if app.notifier.is_some() {
        vec![
            Span::styled("[i]", key_style),
            Span::raw(" Copy ID  "),
            Span::styled("[u]", key_style),
            Span::raw(" Copy URL  "),
            Span::styled("[o]", key_style),
            Span::raw(" Open  "),
            Span::styled("[n]", key_style),
            Span::raw(" Create another  "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Close"),
        ]
    } else {
        match app.focus {
            Focus::TaskId => vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Import  "),
                Span::styled("[F3]", key_style),
                Span::raw(" Advanced"),
            ],
            Focus::CopyAttachments => vec![
                Span::styled("[Space]", key_style),
                Span::raw(" Toggle copy attachments"),
            ],
            Focus::Summary | Focus::Description => vec![
                Span::styled("[Ctrl+Y]", key_style),
                Span::raw(" Copy from original  "),
                Span::styled("[Ctrl+S]", key_style),
                Span::raw(" Create clone"),
            ],
            Focus::Attachments => vec![
                Span::styled("[a]", key_style),
                Span::raw(" Add file  "),
                Span::styled("[d]", key_style),
                Span::raw(" Remove  "),
                Span::styled("[Ctrl+S]", key_style),
                Span::raw(" Create clone"),
            ],
        }
    };

    let line1 = Line::from(context);
    let line2 = Line::from(vec![
        Span::styled("[Tab]", key_style),
        Span::raw(" Next field  "),
        Span::styled("[F1/F2]", key_style),
        Span::raw(" Tabs  "),
        Span::styled("[Ctrl+Q]", key_style),
        Span::raw(" Quit  "),
        Span::raw(format!("Backend: {}  Status: {}", app.backend_name(), app.status_line())),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(vec![line1, line2]))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn focused_border_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub async fn run_tui(
    flow: FlowController,
    log_buffer: LogBufferHandle,
    clipboard: Arc<dyn ClipboardPort>,
    opener: Arc<dyn UrlOpener>,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if ratatui::crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = ratatui::crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(flow, log_buffer, clipboard, opener);
    info!(backend = app.backend_name(), "terminal ui started");

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {
                app.on_tick();
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(event)) => {
                        if handle_event(&mut app, event).await {
                            should_quit = true;
                        }
                    }
                    None => should_quit = true,
                }
            }
        }

        app.refresh().await;
        terminal.draw(|frame| draw_ui(frame, &app))?;
    }

    input_shutdown.cancel();
    debug!("terminal ui stopped");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[0], app.current_tab);

    match app.current_tab {
        Tab::Clone => {
            let importer_height = if app.importer.show_advanced { 6 } else { 5 };
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(importer_height), Constraint::Min(8)])
                .split(layout[1]);
            draw_importer(frame, content[0], app);
            draw_editor(frame, content[1], app);
        }
        Tab::Logs => {
            draw_logs(frame, layout[1], &app.log_buffer);
        }
    }

    draw_footer(frame, layout[2], app);

    if let Some(prompt) = app.add_prompt.as_ref() {
        draw_add_prompt(frame, centered_rect(area, 60, 20), prompt);
    }

    if let Some(notifier) = app.notifier.as_ref() {
        draw_notifier(frame, centered_rect(area, 60, 50), notifier);
    }

    draw_notices(frame, area, &app.notices.active());
}

pub(super) fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_buffer_drops_oldest() {
        let mut buffer = LogBuffer::new(2);
        buffer.push_line("a".to_string());
        buffer.push_line("b".to_string());
        buffer.push_line("c".to_string());
        assert_eq!(buffer.snapshot(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_log_writer_splits_lines() {
        let handle = LogBuffer::handle(LOG_BUFFER_CAPACITY);
        let factory = LogWriterFactory::new(handle.clone());
        {
            let mut writer = factory.make_writer();
            writer.write_all(b"first line\r\nsecond ").expect("write");
            writer.write_all(b"half\nthird").expect("write");
        }
        let lines = handle.lock().expect("lock").snapshot();
        assert_eq!(
            lines,
            vec![
                "first line".to_string(),
                "second half".to_string(),
                "third".to_string()
            ]
        );
    }

    fn rendered_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_draw_ui_empty_then_loaded() {
        use task_cloner::platform::{SystemClipboard, SystemOpener};
        use task_cloner::Notices;
        use task_cloner_adapter::MockBackend;

        let flow = FlowController::new(Arc::new(MockBackend::instant()), Notices::default())
            .with_settle_delay(Duration::ZERO);
        let mut app = AppState::new(
            flow.clone(),
            LogBuffer::handle(8),
            Arc::new(SystemClipboard::new()),
            Arc::new(SystemOpener),
        );
        let mut terminal =
            ratatui::Terminal::new(ratatui::backend::TestBackend::new(120, 40)).expect("terminal");

        app.refresh().await;
        terminal.draw(|frame| draw_ui(frame, &app)).expect("draw");
        assert!(rendered_text(&terminal).contains("Import a task to start cloning"));

        flow.import_task("GLAS30-28922").await.expect("import");
        app.refresh().await;
        terminal.draw(|frame| draw_ui(frame, &app)).expect("draw");
        let text = rendered_text(&terminal);
        assert!(text.contains("Original (read-only)"));
        assert!(text.contains("requirements.pdf"));
        assert!(text.contains("Backend: mock"));
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(outer, 60, 50);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert!(inner.x >= outer.x && inner.y >= outer.y);
    }
}
