use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

const BINDINGS: &[(&str, &str)] = &[
    ("j/k, ↑/↓", "move cursor"),
    ("g / G", "jump to top / bottom"),
    ("Space, Enter", "toggle done"),
    ("a", "add task"),
    ("e", "edit task"),
    ("d", "delete task"),
    ("/", "search"),
    ("Esc", "clear search"),
    ("t", "toggle light/dark theme"),
    ("?", "this help"),
    ("q", "quit"),
];

/// Render the key binding reference as a centered overlay.
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.palette.background;
    let height = (BINDINGS.len() + 3) as u16;
    let rect = centered_rect(44, height, area);

    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" keys ")
        .style(Style::default().bg(bg).fg(app.palette.text))
        .border_style(Style::default().fg(app.palette.highlight).bg(bg));

    let key_width = BINDINGS
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("  {:>width$}  ", key, width = key_width),
                    Style::default()
                        .fg(app.palette.text_bright)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(app.palette.text).bg(bg)),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "  ? or Esc to close",
        Style::default().fg(app.palette.dim).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
