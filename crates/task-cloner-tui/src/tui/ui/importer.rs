/*
[INPUT]:  TaskImporter form state and import busy flag
[OUTPUT]: Importer panel rendered into Ratatui frame
[POS]:    TUI UI importer panel
[UPDATE]: When importer inputs or advanced options change
*/

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use task_cloner::importer::EXAMPLE_TASK_ID;

use super::layout::draw_text_field;
use crate::tui::app::{AppState, Focus};

pub(in crate::tui) fn draw_importer(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let [field_area, hint_area, advanced_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(u16::from(app.importer.show_advanced)),
    ])
    .areas(area);

    let title = if app.snapshot.importing {
        format!("Task ID {} importing", app.spinner())
    } else {
        "Task ID".to_string()
    };
    draw_text_field(
        frame,
        field_area,
        &title,
        app.importer.input(),
        app.focus == Focus::TaskId && app.add_prompt.is_none() && app.notifier.is_none(),
        false,
    );

    let hint = Line::from(vec![
        Span::styled(
            format!(" Enter a JIRA task ID (e.g., {EXAMPLE_TASK_ID}) and press Enter"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            "  [F3] Advanced",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
    ]);
    frame.render_widget(Paragraph::new(hint), hint_area);

    if app.importer.show_advanced {
        let mark = if app.importer.copy_attachments { "x" } else { " " };
        let style = if app.focus == Focus::CopyAttachments {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" [{mark}] Copy attachments from the original task"),
                style,
            ))),
            advanced_area,
        );
    }
}
