use crate::domain::task::Task;

/// Checks if a task matches a free-text search query.
///
/// Matching is a case-insensitive substring test against the title,
/// description, each tag and the assignee. A blank query matches every task.
///
/// # Examples
/// ```
/// use kanban_core::domain::filter::matches_query;
/// use kanban_core::domain::{ColumnId, Task, TaskId};
///
/// let status: ColumnId = "todo".parse().unwrap();
/// let mut task = Task::new(TaskId::new(1), "Fix bug", status);
/// task.tags.push("backend".to_string());
///
/// assert!(matches_query(&task, "BUG"));
/// assert!(matches_query(&task, "back"));
/// assert!(matches_query(&task, ""));
/// assert!(!matches_query(&task, "frontend"));
/// ```
pub fn matches_query(task: &Task, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&query);

    contains(task.title.as_str())
        || task.description.as_deref().is_some_and(contains)
        || task.tags.iter().any(|tag| contains(tag.as_str()))
        || task.assignee.as_deref().is_some_and(contains)
}

/// Keeps the tasks matching `query`, preserving input order
pub fn filter_tasks<'a, I>(tasks: I, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| matches_query(task, query))
        .collect()
}
