use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.palette.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Search => {
            // Search prompt: /pattern▌
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.palette.text_bright).bg(bg),
                ),
                Span::styled(
                    "\u{258C}",
                    Style::default().fg(app.palette.highlight).bg(bg),
                ),
            ];
            with_hint(&mut spans, "Enter keep  Esc clear", app, width);
            Line::from(spans)
        }
        Mode::Confirm => {
            let prompt = match &app.confirm {
                Some(state) => format!("delete \"{}\"? ", state.title),
                None => String::new(),
            };
            let mut spans = vec![Span::styled(
                prompt,
                Style::default().fg(app.palette.red).bg(bg),
            )];
            with_hint(&mut spans, "y confirm  n cancel", app, width);
            Line::from(spans)
        }
        Mode::Navigate | Mode::Edit => {
            if let Some(message) = &app.status_message {
                let mut spans = vec![Span::styled(
                    message.clone(),
                    Style::default().fg(app.palette.text).bg(bg),
                )];
                with_hint(&mut spans, "? help", app, width);
                Line::from(spans)
            } else if !app.search_input.is_empty() {
                // Active filter shown dimmed
                let mut spans = vec![Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.palette.dim).bg(bg),
                )];
                with_hint(&mut spans, "Esc clear  ? help", app, width);
                Line::from(spans)
            } else {
                let mut spans = Vec::new();
                with_hint(&mut spans, "? help", app, width);
                Line::from(spans)
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-align a dim hint after the existing spans.
fn with_hint(spans: &mut Vec<Span<'static>>, hint: &'static str, app: &App, width: usize) {
    let bg = app.palette.background;
    let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let hint_width = hint.width();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.palette.dim).bg(bg),
        ));
    }
}
