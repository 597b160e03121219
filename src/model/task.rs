use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// The serialized field names (`id`, `title`, `description`, `completed`,
/// `createdAt`) are a compatibility contract: the persisted payload is a
/// plain JSON array of these records with no schema version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, generated at creation and never recomputed
    pub id: String,
    /// Task title (non-empty; enforced by the CLI/TUI, not the store)
    pub title: String,
    /// Optional longer text; omitted from the payload when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// Creation time as epoch milliseconds; immutable after creation
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Task {
    /// Create a new, uncompleted task with a fresh id.
    pub fn new(title: String, description: Option<String>) -> Self {
        Task {
            id: generate_id(),
            title,
            description,
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

const ID_SUFFIX_LEN: usize = 9;
const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a task id: creation epoch-millis followed by a random
/// base-36 suffix to disambiguate same-millisecond creations.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let mut id = Utc::now().timestamp_millis().to_string();
    for _ in 0..ID_SUFFIX_LEN {
        let idx = rng.random_range(0..ID_CHARSET.len());
        id.push(ID_CHARSET[idx] as char);
    }
    id
}

/// A partial update for [`Task`]. Fields left as `None` are untouched;
/// `id` and `created_at` cannot be patched. The nested option on
/// `description` distinguishes "leave alone" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Merge this patch over an existing task in place.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}
