/*
[INPUT]:  Attachment sequences and their list selection state
[OUTPUT]: Attachment list rendered into Ratatui frame
[POS]:    TUI UI attachment list, shared by the original and clone panes
[UPDATE]: When attachment columns or empty-state hints change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use task_cloner::attachments::AttachmentListState;
use task_cloner_adapter::Attachment;

use crate::tui::runtime::{border_style, focused_border_style};

pub(super) fn draw_attachment_list(
    frame: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    attachments: &[Attachment],
    state: &AttachmentListState,
    focused: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title(format!("{title} ({})", attachments.len()));

    if attachments.is_empty() {
        let mut lines = vec![Line::from(Span::styled(
            "No attachments",
            Style::default().fg(Color::DarkGray),
        ))];
        if !state.read_only {
            lines.push(Line::from(Span::styled(
                "[a] add file or drop one here",
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let items = attachments
        .iter()
        .map(|attachment| {
            let mut spans = vec![
                Span::raw(attachment.name.clone()),
                Span::styled(
                    format!("  {}", attachment.size),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if let Some(author) = attachment.author.as_deref() {
                spans.push(Span::styled(
                    format!("  by {author}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let is_new = attachment
                .id
                .as_deref()
                .is_some_and(|id| id.starts_with("new-"));
            if is_new {
                spans.push(Span::styled("  new", Style::default().fg(Color::Green)));
            } else if !state.read_only && !attachment.is_removable() {
                spans.push(Span::styled("  fixed", Style::default().fg(Color::DarkGray)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(state.selected(attachments.len()));
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut list_state);
}
