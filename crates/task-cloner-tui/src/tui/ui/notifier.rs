/*
[INPUT]:  SuccessNotifier holding the create response
[OUTPUT]: Success modal rendered into Ratatui frame
[POS]:    TUI UI success notifier modal
[UPDATE]: When notifier contents or actions change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use task_cloner::SuccessNotifier;

pub(in crate::tui) fn draw_notifier(frame: &mut ratatui::Frame, area: Rect, notifier: &SuccessNotifier) {
    frame.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::Yellow);

    let mut lines = vec![
        Line::from(Span::styled(
            "Task Cloned Successfully",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("New task: ", label),
            Span::styled(
                notifier.task_id().unwrap_or("-").to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if let Some(url) = notifier.url() {
        lines.push(Line::from(vec![
            Span::styled("URL: ", label),
            Span::raw(url.to_string()),
        ]));
    }
    if let Some(message) = notifier.response().message.as_deref() {
        lines.push(Line::from(Span::raw(message.to_string())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[i]", key_style),
        Span::raw(" Copy ID  "),
        Span::styled("[u]", key_style),
        Span::raw(" Copy URL  "),
        Span::styled("[o]", key_style),
        Span::raw(" Open in browser"),
    ]));
    lines.push(Line::from(vec![
        Span::styled("[n]", key_style),
        Span::raw(" Create another  "),
        Span::styled("[Esc]", key_style),
        Span::raw(" Close"),
    ]));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title("Clone Created"),
    );
    frame.render_widget(widget, area);
}
