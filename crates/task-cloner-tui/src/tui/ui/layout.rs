/*
[INPUT]:  Current tab, text fields, focus flags
[OUTPUT]: Tab bar, add-file prompt, and shared text field renderer
[POS]:    TUI UI layout helpers
[UPDATE]: When tabs or field rendering change
*/

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};
use task_cloner::text_field::TextField;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::Tab;
use crate::tui::runtime::{border_style, focused_border_style, header_style};

pub(in crate::tui) fn draw_tabs(frame: &mut ratatui::Frame, area: Rect, current_tab: Tab) {
    let titles = vec![Line::from("Clone [F1]"), Line::from("Logs [F2]")];
    let selected = match current_tab {
        Tab::Clone => 0,
        Tab::Logs => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Task Cloner"),
        )
        .highlight_style(header_style())
        .select(selected);

    frame.render_widget(tabs, area);
}

pub(in crate::tui) fn draw_add_prompt(frame: &mut ratatui::Frame, area: Rect, prompt: &TextField) {
    frame.render_widget(Clear, area);
    let [input, hint] = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);
    draw_text_field(frame, input, "Attach file (path)", prompt, true, false);
    frame.render_widget(
        Paragraph::new("[Enter] Attach  [Esc] Cancel  (drop a file here to paste its path)")
            .style(Style::default().fg(Color::DarkGray)),
        hint,
    );
}

/// Render a bordered text field. The terminal cursor follows the caret when
/// the field has focus.
pub(in crate::tui) fn draw_text_field(
    frame: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    field: &TextField,
    focused: bool,
    multiline: bool,
) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let (line, col) = field.caret_line_col();
    let caret_line = field.value().split('\n').nth(line).unwrap_or_default();
    let caret_x = caret_line
        .chars()
        .take(col)
        .collect::<String>()
        .width();

    let scroll_y = if multiline {
        (line + 1).saturating_sub(inner_height)
    } else {
        0
    };
    let scroll_x = (caret_x + 1).saturating_sub(inner_width);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title(title.to_string());
    let text: Vec<Line> = if multiline {
        field.value().split('\n').map(Line::from).collect()
    } else {
        vec![Line::from(field.value())]
    };
    let widget = Paragraph::new(text)
        .block(block)
        .scroll((scroll_y as u16, scroll_x as u16));
    frame.render_widget(widget, area);

    if focused && inner_height > 0 && inner_width > 0 {
        let x = area.x + 1 + (caret_x - scroll_x) as u16;
        let row = if multiline { line - scroll_y } else { 0 };
        let y = area.y + 1 + row as u16;
        frame.set_cursor_position(Position::new(x, y));
    }
}
