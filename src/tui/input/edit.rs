use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, FormField, Mode};

/// Key handling for the add/edit form overlay.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        // Esc cancels without saving
        (_, KeyCode::Esc) => {
            app.form = None;
            app.mode = Mode::Navigate;
        }

        // Enter submits; the form stays open when the title is blank
        (_, KeyCode::Enter) => {
            app.submit_form();
        }

        // Tab / Shift+Tab / Up / Down switch between fields
        (_, KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down) => {
            form.field = match form.field {
                FormField::Title => FormField::Description,
                FormField::Description => FormField::Title,
            };
            form.cursor = form.focused_text().len();
        }

        (_, KeyCode::Left) => {
            form.cursor = prev_boundary(form.focused_text(), form.cursor);
        }
        (_, KeyCode::Right) => {
            form.cursor = next_boundary(form.focused_text(), form.cursor);
        }
        (_, KeyCode::Home) => {
            form.cursor = 0;
        }
        (_, KeyCode::End) => {
            form.cursor = form.focused_text().len();
        }

        (_, KeyCode::Backspace) => {
            let cursor = form.cursor;
            if cursor > 0 {
                let start = prev_boundary(form.focused_text(), cursor);
                form.focused_text_mut().replace_range(start..cursor, "");
                form.cursor = start;
            }
        }
        (_, KeyCode::Delete) => {
            let cursor = form.cursor;
            let end = next_boundary(form.focused_text(), cursor);
            if end > cursor {
                form.focused_text_mut().replace_range(cursor..end, "");
            }
        }

        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            let cursor = form.cursor;
            form.focused_text_mut().insert(cursor, c);
            form.cursor += c.len_utf8();
        }

        _ => {}
    }
}

/// Previous grapheme boundary before `pos` (0 when already at the start)
fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .grapheme_indices(true)
        .next_back()
        .map_or(0, |(i, _)| i)
}

/// Next grapheme boundary after `pos` (`text.len()` when already at the end)
fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .graphemes(true)
        .next()
        .map_or(pos, |g| pos + g.len())
}
