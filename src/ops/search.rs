use std::ops::Range;

use regex::Regex;

use crate::model::task::Task;

/// Build the matcher for a search query: case-insensitive, literal
/// (the query is escaped, not interpreted). A blank query means
/// "no filter" and yields `None`.
pub fn build_query(query: &str) -> Option<Regex> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(trimmed))).ok()
}

/// Whether a task matches: substring of the title, or of the
/// description when present.
pub fn task_matches(task: &Task, re: &Regex) -> bool {
    re.is_match(&task.title)
        || task
            .description
            .as_deref()
            .is_some_and(|desc| re.is_match(desc))
}

/// Indices of matching tasks, in stored order. `None` selects everything.
pub fn filter_indices(tasks: &[Task], re: Option<&Regex>) -> Vec<usize> {
    match re {
        None => (0..tasks.len()).collect(),
        Some(re) => tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task_matches(task, re))
            .map(|(i, _)| i)
            .collect(),
    }
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
pub fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}
