use std::sync::Mutex;

use crate::model::task::{Task, TaskPatch};
use crate::store::kv::{KeyValue, KvError};

/// Storage key for the task collection
pub const TASKS_KEY: &str = "@todo_tasks";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("stored payload for {key} is corrupt: {source}")]
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Kv(#[from] KvError),
}

/// The persisted task collection.
///
/// The whole collection lives under one key as a plain JSON array, and
/// every mutator is a full load → modify → save. That is only safe when
/// writers are serialized, so all mutations run under an in-process mutex
/// (the single-writer queue) plus the KV store's exclusive lock (which
/// covers concurrent CLI/TUI processes).
pub struct TaskStore<S> {
    kv: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValue> TaskStore<S> {
    pub fn new(kv: S) -> Self {
        TaskStore {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Load the full collection in stored order.
    ///
    /// An absent key is an empty collection; an unparseable payload is
    /// surfaced as [`StoreError::Corrupt`] rather than swallowed, so the
    /// caller can tell "no data yet" from "data lost".
    pub fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        match self.kv.get(TASKS_KEY)? {
            None => Ok(Vec::new()),
            Some(payload) => serde_json::from_str(&payload).map_err(|e| StoreError::Corrupt {
                key: TASKS_KEY,
                source: e,
            }),
        }
    }

    fn save_all(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(tasks).map_err(|e| StoreError::Corrupt {
            key: TASKS_KEY,
            source: e,
        })?;
        self.kv.set(TASKS_KEY, &payload)?;
        Ok(())
    }

    /// Append a newly constructed task and return it.
    pub fn add(&self, title: &str, description: Option<&str>) -> Result<Task, StoreError> {
        let _queue = self.write_lock.lock().unwrap();
        let _lock = self.kv.lock_exclusive()?;

        let mut tasks = self.load_all()?;
        let task = Task::new(title.to_string(), description.map(str::to_string));
        tasks.push(task.clone());
        self.save_all(&tasks)?;
        Ok(task)
    }

    /// Merge a patch over the task with the given id and return the
    /// updated record. The collection is untouched when the id is absent.
    pub fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task, StoreError> {
        let _queue = self.write_lock.lock().unwrap();
        let _lock = self.kv.lock_exclusive()?;

        let mut tasks = self.load_all()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(task);
        let updated = task.clone();
        self.save_all(&tasks)?;
        Ok(updated)
    }

    /// Remove the task with the given id.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _queue = self.write_lock.lock().unwrap();
        let _lock = self.kv.lock_exclusive()?;

        let mut tasks = self.load_all()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save_all(&tasks)?;
        Ok(())
    }

    /// Flip the completion flag on the task with the given id and return
    /// the updated record.
    pub fn toggle(&self, id: &str) -> Result<Task, StoreError> {
        let _queue = self.write_lock.lock().unwrap();
        let _lock = self.kv.lock_exclusive()?;

        let mut tasks = self.load_all()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        task.completed = !task.completed;
        let updated = task.clone();
        self.save_all(&tasks)?;
        Ok(updated)
    }
}
