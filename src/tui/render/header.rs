use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

/// Render the header: app name on the left, task counts on the right,
/// with a separator rule below.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.palette.background;
    let width = area.width as usize;

    let title = format!(" tick v{}", env!("CARGO_PKG_VERSION"));
    let counts = format!("{} active / {} total ", app.active_count(), app.tasks.len());

    let mut spans = vec![Span::styled(
        title.clone(),
        Style::default()
            .fg(app.palette.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let used = title.width() + counts.width();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            counts,
            Style::default().fg(app.palette.dim).bg(bg),
        ));
    }

    let separator = Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(app.palette.dim).bg(bg),
    ));

    let paragraph =
        Paragraph::new(vec![Line::from(spans), separator]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
