use serde::Serialize;

use crate::model::task::Task;
use crate::model::theme::{ResolvedTheme, ThemePreference};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub tasks: Vec<TaskJson<'a>>,
    pub active: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct ThemeJson {
    pub preference: &'static str,
    pub resolved: &'static str,
}

pub fn task_to_json(task: &Task) -> TaskJson<'_> {
    TaskJson {
        id: &task.id,
        title: &task.title,
        description: task.description.as_deref(),
        completed: task.completed,
        created_at: task.created_at,
    }
}

pub fn task_list_json<'a>(tasks: &[&'a Task], total_pool: &[Task]) -> TaskListJson<'a> {
    TaskListJson {
        tasks: tasks.iter().map(|t| task_to_json(t)).collect(),
        active: total_pool.iter().filter(|t| !t.completed).count(),
        total: total_pool.len(),
    }
}

pub fn theme_json(pref: ThemePreference, resolved: ResolvedTheme) -> ThemeJson {
    ThemeJson {
        preference: pref.token(),
        resolved: resolved.token(),
    }
}

// ---------------------------------------------------------------------------
// Plain-text formatting
// ---------------------------------------------------------------------------

/// One listing line: `[x] <id>  <title>` with the description indented below.
pub fn format_task_lines(task: &Task) -> Vec<String> {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut lines = vec![format!("{} {}  {}", checkbox, task.id, task.title)];
    if let Some(desc) = &task.description {
        lines.push(format!("    {}", desc));
    }
    lines
}

/// The `N active, M total` summary shown under listings.
pub fn format_summary(tasks: &[Task]) -> String {
    let active = tasks.iter().filter(|t| !t.completed).count();
    format!("{} active, {} total", active, tasks.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, completed: bool) -> Task {
        let mut task = Task::new(title.into(), None);
        task.completed = completed;
        task
    }

    #[test]
    fn format_task_lines_shape() {
        let mut t = task("Buy milk", false);
        t.description = Some("2%".into());
        let lines = format_task_lines(&t);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[ ] "));
        assert!(lines[0].ends_with("  Buy milk"));
        assert_eq!(lines[1], "    2%");

        let done = task("Done", true);
        assert!(format_task_lines(&done)[0].starts_with("[x] "));
    }

    #[test]
    fn summary_counts_active_and_total() {
        let tasks = vec![task("a", false), task("b", true), task("c", false)];
        assert_eq!(format_summary(&tasks), "2 active, 3 total");
    }

    #[test]
    fn task_json_uses_wire_names() {
        let t = task("Buy milk", false);
        let value = serde_json::to_value(task_to_json(&t)).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
        assert!(value.get("description").is_none());
    }
}
