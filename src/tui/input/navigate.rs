use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmState, FormState, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything except its dismiss keys
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    // Transient status messages clear on the next keypress
    app.status_message = None;

    match (key.modifiers, key.code) {
        // Quit: q or Ctrl+C
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Esc clears an active search filter
        (_, KeyCode::Esc) => {
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.refilter();
            }
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => {
            move_cursor(app, -1);
        }
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => {
            move_cursor(app, 1);
        }
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.cursor = 0;
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => {
            app.cursor = app.filtered.len().saturating_sub(1);
        }

        // Toggle completion on the selected task
        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Enter) => {
            app.toggle_selected();
        }

        // Add a task
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.form = Some(FormState::add());
            app.mode = Mode::Edit;
        }

        // Edit the selected task
        (KeyModifiers::NONE, KeyCode::Char('e')) => {
            if let Some(task) = app.selected_task() {
                app.form = Some(FormState::edit(task));
                app.mode = Mode::Edit;
            }
        }

        // Delete the selected task (with confirmation)
        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let Some(task) = app.selected_task() {
                app.confirm = Some(ConfirmState {
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                });
                app.mode = Mode::Confirm;
            }
        }

        // Search: /
        (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.mode = Mode::Search;
        }

        // Theme toggle
        (KeyModifiers::NONE, KeyCode::Char('t')) => {
            app.toggle_theme();
        }

        // Help overlay
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        _ => {}
    }
}

pub(super) fn move_cursor(app: &mut App, delta: isize) {
    if app.filtered.is_empty() {
        app.cursor = 0;
        return;
    }
    let last = app.filtered.len() - 1;
    app.cursor = app
        .cursor
        .saturating_add_signed(delta)
        .min(last);
}
