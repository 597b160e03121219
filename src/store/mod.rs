pub mod config;
pub mod kv;
pub mod tasks;
pub mod theme;
pub mod watcher;

pub use config::{ConfigError, read_config, resolve_data_dir};
pub use kv::{FileKv, KeyValue, KvError};
pub use tasks::{StoreError, TASKS_KEY, TaskStore};
pub use theme::{THEME_KEY, ThemeStore};
pub use watcher::StoreWatcher;
