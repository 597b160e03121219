use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

use super::push_highlighted_spans;

/// Render the task list with cursor, scroll, and search highlighting.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.palette.background;

    if app.filtered.is_empty() {
        let message = if app.tasks.is_empty() {
            "no tasks — press a to add one"
        } else {
            "no matching tasks"
        };
        let line = Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(app.palette.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    // Keep the cursor row inside the viewport
    let visible = area.height as usize;
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible {
        app.scroll_offset = app.cursor + 1 - visible;
    }
    if app.scroll_offset + visible > app.filtered.len() {
        app.scroll_offset = app.filtered.len().saturating_sub(visible);
    }

    let search_re = app.active_search_re();
    let match_style = Style::default()
        .fg(app.palette.search_match_fg)
        .bg(app.palette.search_match_bg);

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    for (row, &task_idx) in app
        .filtered
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
    {
        let task = &app.tasks[task_idx];
        let selected = row == app.cursor;
        let row_bg = if selected { app.palette.selection_bg } else { bg };

        let (checkbox, title_style) = if task.completed {
            (
                Span::styled(
                    " [x] ",
                    Style::default().fg(app.palette.green).bg(row_bg),
                ),
                Style::default()
                    .fg(app.palette.dim)
                    .bg(row_bg)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            (
                Span::styled(" [ ] ", Style::default().fg(app.palette.dim).bg(row_bg)),
                Style::default().fg(app.palette.text).bg(row_bg),
            )
        };

        let mut spans = vec![checkbox];
        push_highlighted_spans(&mut spans, &task.title, title_style, match_style, search_re.as_ref());

        if let Some(desc) = &task.description {
            spans.push(Span::styled(
                "  ",
                Style::default().bg(row_bg),
            ));
            push_highlighted_spans(
                &mut spans,
                desc,
                Style::default().fg(app.palette.dim).bg(row_bg),
                match_style,
                search_re.as_ref(),
            );
        }

        // Pad the selection background to the full width
        if selected {
            let used: usize = spans.iter().map(|s| s.content.width()).sum();
            let width = area.width as usize;
            if used < width {
                spans.push(Span::styled(
                    " ".repeat(width - used),
                    Style::default().bg(row_bg),
                ));
            }
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
