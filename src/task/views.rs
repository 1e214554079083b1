//! Read-only views over collected tasks

use crate::task::types::FileTask;
use serde::{Deserialize, Serialize};

/// Bucket name for tasks that appear before any heading
pub const NO_CONTEXT: &str = "No Context";

/// Sort criteria for [`sort_tasks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// By file name
    File,
    /// By heading context
    Context,
    /// Incomplete first, then by file name
    Completion,
}

/// Tasks sharing one heading context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextGroup<'a> {
    pub context: String,
    pub tasks: Vec<&'a FileTask>,
}

/// Group tasks by heading context, in order of first appearance
pub fn group_by_context<'a>(
    tasks: impl IntoIterator<Item = &'a FileTask>,
) -> Vec<ContextGroup<'a>> {
    let mut groups: Vec<ContextGroup<'a>> = Vec::new();

    for task in tasks {
        let context = if task.task.context.is_empty() {
            NO_CONTEXT
        } else {
            task.task.context.as_str()
        };

        match groups.iter_mut().find(|group| group.context == context) {
            Some(group) => group.tasks.push(task),
            None => groups.push(ContextGroup {
                context: context.to_string(),
                tasks: vec![task],
            }),
        }
    }

    groups
}

/// Keep tasks whose own checkbox matches `completed`
pub fn filter_by_completion<'a>(
    tasks: impl IntoIterator<Item = &'a FileTask>,
    completed: bool,
) -> Vec<&'a FileTask> {
    tasks
        .into_iter()
        .filter(|task| task.task.completed == completed)
        .collect()
}

/// Stable sort by the given criterion
pub fn sort_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a FileTask>,
    sort_by: SortBy,
) -> Vec<&'a FileTask> {
    let mut sorted: Vec<&FileTask> = tasks.into_iter().collect();

    match sort_by {
        SortBy::File => sorted.sort_by(|a, b| a.file_name.cmp(&b.file_name)),
        SortBy::Context => sorted.sort_by(|a, b| a.task.context.cmp(&b.task.context)),
        SortBy::Completion => sorted.sort_by(|a, b| {
            a.task
                .completed
                .cmp(&b.task.completed)
                .then_with(|| a.file_name.cmp(&b.file_name))
        }),
    }

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::types::Task;

    fn file_task(file: &str, line: usize, completed: bool, context: &str) -> FileTask {
        let mut task = Task::new("", format!("{file}:{line}"), completed, line, 0);
        task.context = context.to_string();
        FileTask::new(task, file)
    }

    fn contents(tasks: &[&FileTask]) -> Vec<String> {
        tasks.iter().map(|t| t.task.content.clone()).collect()
    }

    #[test]
    fn test_group_by_context_first_seen_order() {
        let tasks = vec![
            file_task("a.md", 1, false, ""),
            file_task("a.md", 3, false, "Work"),
            file_task("b.md", 1, true, ""),
            file_task("b.md", 4, true, "Home"),
        ];
        let groups = group_by_context(&tasks);

        let names: Vec<_> = groups.iter().map(|g| g.context.as_str()).collect();
        assert_eq!(names, vec![NO_CONTEXT, "Work", "Home"]);
        assert_eq!(contents(&groups[0].tasks), vec!["a.md:1", "b.md:1"]);
    }

    #[test]
    fn test_filter_uses_own_checkbox() {
        let tasks = vec![
            file_task("a.md", 1, false, ""),
            file_task("a.md", 2, true, ""),
        ];

        assert_eq!(contents(&filter_by_completion(&tasks, true)), vec!["a.md:2"]);
        assert_eq!(contents(&filter_by_completion(&tasks, false)), vec!["a.md:1"]);
    }

    #[test]
    fn test_sort_by_file_is_stable() {
        let tasks = vec![
            file_task("b.md", 1, false, ""),
            file_task("a.md", 2, false, ""),
            file_task("b.md", 3, false, ""),
            file_task("a.md", 4, false, ""),
        ];

        let sorted = sort_tasks(&tasks, SortBy::File);
        assert_eq!(contents(&sorted), vec!["a.md:2", "a.md:4", "b.md:1", "b.md:3"]);
    }

    #[test]
    fn test_sort_by_context() {
        let tasks = vec![
            file_task("a.md", 1, false, "Zeta"),
            file_task("a.md", 2, false, "Alpha"),
        ];

        let sorted = sort_tasks(&tasks, SortBy::Context);
        assert_eq!(contents(&sorted), vec!["a.md:2", "a.md:1"]);
    }

    #[test]
    fn test_sort_by_completion_puts_incomplete_first() {
        let tasks = vec![
            file_task("a.md", 1, true, ""),
            file_task("b.md", 2, false, ""),
            file_task("a.md", 3, false, ""),
        ];

        let sorted = sort_tasks(&tasks, SortBy::Completion);
        assert_eq!(contents(&sorted), vec!["a.md:3", "b.md:2", "a.md:1"]);
    }
}
