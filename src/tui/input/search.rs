use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Search is incremental: the list refilters on every keystroke.
/// Enter keeps the filter and returns to Navigate; Esc clears it.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => {
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Esc) => {
            app.search_input.clear();
            app.refilter();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            app.search_input.pop();
            app.refilter();
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
            app.refilter();
        }
        _ => {}
    }
}
