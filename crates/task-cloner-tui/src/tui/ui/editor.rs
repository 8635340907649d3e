/*
[INPUT]:  TaskEditor draft, original task, focus, create busy flag
[OUTPUT]: Original and clone panes rendered into Ratatui frame
[POS]:    TUI UI editor panel
[UPDATE]: When draft fields or the original task summary change
*/

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use task_cloner::editor::EditorState;
use task_cloner_adapter::Task;

use super::attachments::draw_attachment_list;
use super::layout::draw_text_field;
use crate::tui::app::{AppState, Focus};
use crate::tui::runtime::border_style;

const MAX_ATTACHMENT_ROWS: u16 = 6;

pub(in crate::tui) fn draw_editor(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let (Some(original), Some(draft)) = (app.editor.original(), app.editor.draft()) else {
        draw_empty(frame, area);
        return;
    };

    let [original_area, clone_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    draw_original(frame, original_area, original, app);

    let submitting = app.editor_state() == EditorState::Submitting;
    let interactive = app.add_prompt.is_none() && app.notifier.is_none();
    let attachment_rows = (draft.attachments.len() as u16).clamp(2, MAX_ATTACHMENT_ROWS) + 2;
    let [summary_area, description_area, attachments_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(attachment_rows),
    ])
    .areas(clone_area);

    let summary_title = if submitting {
        format!("Summary {} creating clone", app.spinner())
    } else {
        format!("Summary  {} {}", draft.issue_type, draft.priority)
    };
    draw_text_field(
        frame,
        summary_area,
        &summary_title,
        &draft.summary,
        interactive && app.focus == Focus::Summary,
        false,
    );
    draw_text_field(
        frame,
        description_area,
        "Description",
        &draft.description,
        interactive && app.focus == Focus::Description,
        true,
    );
    draw_attachment_list(
        frame,
        attachments_area,
        "Clone attachments",
        &draft.attachments,
        &app.draft_attachments,
        interactive && app.focus == Focus::Attachments,
    );
}

fn draw_empty(frame: &mut ratatui::Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Import a task to start cloning",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Clone"),
    );
    frame.render_widget(widget, area);
}

fn draw_original(frame: &mut ratatui::Frame, area: Rect, task: &Task, app: &AppState) {
    let attachment_rows = (task.attachments.len() as u16).clamp(1, MAX_ATTACHMENT_ROWS) + 2;
    let [details_area, attachments_area] =
        Layout::vertical([Constraint::Min(6), Constraint::Length(attachment_rows)]).areas(area);

    let label = Style::default().fg(Color::Yellow);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(task.id.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  [{}]", task.status)),
        ]),
        Line::from(Span::raw(task.summary.clone())),
        Line::from(vec![
            Span::styled("Project: ", label),
            Span::raw(task.project_key.clone()),
            Span::styled("  Assignee: ", label),
            Span::raw(task.assignee.clone()),
        ]),
    ];
    if let Some(labels) = task.labels.as_ref().filter(|labels| !labels.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("Labels: ", label),
            Span::raw(labels.join(", ")),
        ]));
    }
    if let Some(components) = task.components.as_ref().filter(|c| !c.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("Components: ", label),
            Span::raw(components.join(", ")),
        ]));
    }
    lines.push(Line::from(""));
    lines.extend(task.description.lines().map(|line| Line::from(line.to_string())));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Original (read-only)"),
        );
    frame.render_widget(widget, details_area);

    draw_attachment_list(
        frame,
        attachments_area,
        "Original attachments",
        &task.attachments,
        &app.original_attachments,
        false,
    );
}
