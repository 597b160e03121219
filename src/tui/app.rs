use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::model::config::ColorOverrides;
use crate::model::task::{Task, TaskPatch};
use crate::model::theme::{ResolvedTheme, ThemePreference, detect_system_theme};
use crate::ops::search;
use crate::store::watcher::StoreWatcher;
use crate::store::{FileKv, TaskStore, ThemeStore, read_config, resolve_data_dir};

use super::input;
use super::render;
use super::theme::Palette;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    /// Add/edit form overlay
    Edit,
    /// Delete confirmation prompt
    Confirm,
}

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
}

/// State of the add/edit form overlay
#[derive(Debug, Clone)]
pub struct FormState {
    /// `Some(id)` when editing an existing task, `None` when adding
    pub editing: Option<String>,
    pub field: FormField,
    pub title: String,
    pub description: String,
    /// Byte offset of the cursor within the focused field
    pub cursor: usize,
}

impl FormState {
    pub fn add() -> Self {
        FormState {
            editing: None,
            field: FormField::Title,
            title: String::new(),
            description: String::new(),
            cursor: 0,
        }
    }

    pub fn edit(task: &Task) -> Self {
        FormState {
            editing: Some(task.id.clone()),
            field: FormField::Title,
            cursor: task.title.len(),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
        }
    }

    pub fn focused_text(&self) -> &str {
        match self.field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
        }
    }

    pub fn focused_text_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }
}

/// Pending delete confirmation
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub task_id: String,
    pub title: String,
}

/// Main application state
pub struct App {
    pub store: TaskStore<FileKv>,
    pub theme_store: ThemeStore<FileKv>,
    /// Last known full collection (source of truth is the store)
    pub tasks: Vec<Task>,
    /// Indices into `tasks` matching the current search, in stored order
    pub filtered: Vec<usize>,
    /// Cursor index into `filtered`
    pub cursor: usize,
    pub scroll_offset: usize,
    pub mode: Mode,
    pub search_input: String,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub preference: ThemePreference,
    pub resolved: ResolvedTheme,
    pub palette: Palette,
    pub color_overrides: ColorOverrides,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        store: TaskStore<FileKv>,
        theme_store: ThemeStore<FileKv>,
        color_overrides: ColorOverrides,
        preference: ThemePreference,
        system: Option<ResolvedTheme>,
    ) -> Self {
        let resolved = preference.resolve(system);
        let palette = Palette::for_theme(resolved, &color_overrides);

        let mut app = App {
            store,
            theme_store,
            tasks: Vec::new(),
            filtered: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            mode: Mode::Navigate,
            search_input: String::new(),
            form: None,
            confirm: None,
            show_help: false,
            status_message: None,
            preference,
            resolved,
            palette,
            color_overrides,
            should_quit: false,
        };
        app.reload();
        app
    }

    /// Replace local state wholesale from the store (initial load, and
    /// whenever the store changes underneath us).
    pub fn reload(&mut self) {
        match self.store.load_all() {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => {
                // Render something rather than dying, but say why
                self.tasks = Vec::new();
                self.status_message = Some(format!("load failed: {}", e));
            }
        }
        self.refilter();
    }

    /// Recompute the filtered view from `tasks` and the search input,
    /// keeping the cursor in range.
    pub fn refilter(&mut self) {
        let re = self.active_search_re();
        self.filtered = search::filter_indices(&self.tasks, re.as_ref());
        if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len().saturating_sub(1);
        }
    }

    /// The matcher for the current search input (None when blank).
    pub fn active_search_re(&self) -> Option<Regex> {
        search::build_query(&self.search_input)
    }

    /// The task under the cursor, if any.
    pub fn selected_task(&self) -> Option<&Task> {
        self.filtered.get(self.cursor).map(|&i| &self.tasks[i])
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    // -----------------------------------------------------------------
    // Store mutations
    //
    // Each handler applies the store mutator, then patches local state
    // from the returned record. The store serializes mutations, so the
    // optimistic patch cannot drift from the persisted collection.
    // -----------------------------------------------------------------

    /// Toggle completion on the selected task.
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        match self.store.toggle(&id) {
            Ok(updated) => {
                if let Some(local) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *local = updated;
                }
            }
            Err(e) => self.status_message = Some(format!("toggle failed: {}", e)),
        }
    }

    /// Delete a task after confirmation.
    pub fn delete_task(&mut self, id: &str) {
        match self.store.delete(id) {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                self.refilter();
                self.status_message = Some("deleted".to_string());
            }
            Err(e) => self.status_message = Some(format!("delete failed: {}", e)),
        }
    }

    /// Submit the form: add a new task or update the one being edited.
    /// Returns false (and leaves the form open) when the title is blank.
    pub fn submit_form(&mut self) -> bool {
        let Some(form) = self.form.clone() else {
            return false;
        };
        let title = form.title.trim();
        if title.is_empty() {
            self.status_message = Some("title must not be empty".to_string());
            return false;
        }
        let description = {
            let trimmed = form.description.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let result = match &form.editing {
            None => self.store.add(title, description.as_deref()).map(|task| {
                self.tasks.push(task);
            }),
            Some(id) => {
                let patch = TaskPatch {
                    title: Some(title.to_string()),
                    description: Some(description),
                    completed: None,
                };
                self.store.update(id, &patch).map(|updated| {
                    if let Some(local) = self.tasks.iter_mut().find(|t| t.id == *id) {
                        *local = updated;
                    }
                })
            }
        };

        match result {
            Ok(()) => {
                self.form = None;
                self.mode = Mode::Navigate;
                self.refilter();
                true
            }
            Err(e) => {
                self.status_message = Some(format!("save failed: {}", e));
                false
            }
        }
    }

    /// Flip the theme between light and dark and re-derive the palette.
    pub fn toggle_theme(&mut self) {
        match self.theme_store.toggle(detect_system_theme()) {
            Ok(pref) => {
                self.preference = pref;
                self.resolved = pref.resolve(detect_system_theme());
                self.palette = Palette::for_theme(self.resolved, &self.color_overrides);
                self.status_message = Some(format!("theme: {}", self.resolved));
            }
            Err(e) => self.status_message = Some(format!("theme change failed: {}", e)),
        }
    }
}

/// Run the TUI application
pub fn run(data_dir_flag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(data_dir_flag)?;
    let kv = FileKv::open(&data_dir)?;
    let config = read_config(&data_dir)?;

    let theme_store = ThemeStore::new(kv.clone());
    let preference = theme_store.load()?;
    let system = detect_system_theme();

    let mut app = App::new(
        TaskStore::new(kv),
        theme_store,
        config.ui.colors,
        preference,
        system,
    );

    // Watch for external writes (CLI, another instance); reload on change
    let watcher = StoreWatcher::start(&data_dir).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}


fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        // Reload when another process wrote the store. Skipped while the
        // form is open so a half-typed edit isn't clobbered.
        if watcher.is_some_and(StoreWatcher::changed) && app.mode != Mode::Edit {
            app.reload();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
