use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};

use super::centered_rect;

/// Render the add/edit form as a centered overlay.
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let bg = app.palette.background;
    let width = area.width.saturating_sub(8).clamp(20, 60);
    let rect = centered_rect(width, 8, area);

    frame.render_widget(Clear, rect);

    let title = if form.editing.is_some() {
        " edit task "
    } else {
        " new task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(bg).fg(app.palette.text))
        .border_style(Style::default().fg(app.palette.highlight).bg(bg));

    let field_line = |label: &str, value: &str, focused: bool| -> Vec<Line<'static>> {
        let label_style = if focused {
            Style::default()
                .fg(app.palette.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.palette.dim).bg(bg)
        };
        let mut value_spans = vec![Span::styled(
            format!("  {}", value),
            Style::default().fg(app.palette.text_bright).bg(bg),
        )];
        if focused {
            // ▌ cursor at end of the focused field
            value_spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.palette.highlight).bg(bg),
            ));
        }
        vec![
            Line::from(Span::styled(format!("  {}", label), label_style)),
            Line::from(value_spans),
        ]
    };

    let mut lines = Vec::new();
    lines.extend(field_line(
        "title",
        &form.title,
        form.field == FormField::Title,
    ));
    lines.push(Line::default());
    lines.extend(field_line(
        "description",
        &form.description,
        form.field == FormField::Description,
    ));
    lines.push(Line::from(Span::styled(
        "  Enter save  Tab switch field  Esc cancel",
        Style::default().fg(app.palette.dim).bg(bg),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, rect);
}
