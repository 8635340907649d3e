/*
[INPUT]:  Active notices from the shared notice board
[OUTPUT]: Toast stack rendered in the top-right corner
[POS]:    TUI UI notice toasts
[UPDATE]: When notice levels or toast placement change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use task_cloner::notice::{Notice, NoticeLevel};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;
const MAX_TOASTS: usize = 3;

pub(in crate::tui) fn draw_notices(frame: &mut ratatui::Frame, area: Rect, notices: &[Notice]) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);

    // Newest on top.
    for (slot, notice) in notices.iter().rev().take(MAX_TOASTS).enumerate() {
        let y = area.y + 1 + slot as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = match notice.level {
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Error => Color::Red,
        };

        frame.render_widget(Clear, rect);
        let widget = Paragraph::new(Line::from(Span::raw(notice.body.clone())))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(Span::styled(
                        notice.title.clone(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(widget, rect);
    }
}
