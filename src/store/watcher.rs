use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::store::tasks::TASKS_KEY;
use crate::store::theme::THEME_KEY;

/// Watches the data directory for external writes to the store keys
/// (a CLI invocation, another tick instance), so the TUI can reload
/// instead of showing stale state.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl StoreWatcher {
    /// Start watching the given data directory.
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // Only the store keys matter; ignore .lock, config.toml,
                // and the rename source of atomic writes.
                let relevant = event.paths.iter().any(|p| {
                    matches!(
                        p.file_name().and_then(|n| n.to_str()),
                        Some(TASKS_KEY) | Some(THEME_KEY)
                    )
                });

                if relevant {
                    let _ = tx.send(());
                }
            },
            Config::default(),
        )?;

        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(StoreWatcher { _watcher: watcher, rx })
    }

    /// Non-blocking check: true if any store key changed since the last call.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
