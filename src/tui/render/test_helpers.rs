use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::config::ColorOverrides;
use crate::model::theme::ThemePreference;
use crate::store::{FileKv, TaskStore, ThemeStore};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App backed by a throwaway data directory. The TempDir must outlive
/// the App, so it is returned alongside.
pub fn empty_app() -> (App, TempDir) {
    let tmp = TempDir::new().unwrap();
    let kv = FileKv::open(tmp.path()).unwrap();
    let theme_store = ThemeStore::new(kv.clone());
    // Persist an explicit theme so toggling is independent of the host
    theme_store.save(ThemePreference::Dark).unwrap();
    let app = App::new(
        TaskStore::new(kv),
        theme_store,
        ColorOverrides::default(),
        ThemePreference::Dark,
        None,
    );
    (app, tmp)
}

/// An App seeded with the given (title, description, completed) rows.
pub fn app_with_tasks(rows: &[(&str, Option<&str>, bool)]) -> (App, TempDir) {
    let (mut app, tmp) = empty_app();
    for &(title, description, completed) in rows {
        let task = app.store.add(title, description).unwrap();
        if completed {
            app.store.toggle(&task.id).unwrap();
        }
    }
    app.reload();
    (app, tmp)
}
