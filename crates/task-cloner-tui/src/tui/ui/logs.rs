/*
[INPUT]:  LogBufferHandle snapshots for UI
[OUTPUT]: Log panel with level-coloured lines
[POS]:    TUI UI logs panel rendering
[UPDATE]: When log panel layout or level colours change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::LogBufferHandle;
use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_logs(frame: &mut ratatui::Frame, area: Rect, buffer: &LogBufferHandle) {
    let (lines, total) = {
        let guard = buffer.lock().expect("log buffer lock");
        (guard.snapshot(), guard.len())
    };
    // Tail only: the newest lines that fit inside the border.
    let visible = area.height.saturating_sub(2) as usize;
    let first = lines.len().saturating_sub(visible);

    let text = lines[first..]
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), level_style(line))))
        .collect::<Vec<_>>();
    let panel = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Logs ({total})")),
    );
    frame.render_widget(panel, area);
}

fn level_style(line: &str) -> Style {
    if line.contains(" ERROR ") {
        Style::default().fg(Color::Red)
    } else if line.contains(" WARN ") {
        Style::default().fg(Color::Yellow)
    } else if line.contains(" DEBUG ") || line.contains(" TRACE ") {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}
