//! Multi-file aggregation
//!
//! Combines per-file parse results into one [`TaskCollection`] whose global task
//! order follows the caller's file order rather than map iteration order.

use crate::task::parser::process_file;
use crate::task::tree::flatten_with_descendants;
use crate::task::types::{FileTask, FileTasks, TaskCollection, TaskCounts, TaskSummary};
use std::collections::HashMap;
use tracing::debug;

/// File contents keyed by path, iterated in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContents {
    entries: Vec<(String, String)>,
}

impl FileContents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the content for `path`.
    ///
    /// Replacing keeps the path's original position and returns the old content.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<String> {
        let path = path.into();
        let content = content.into();

        if let Some((_, existing)) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            return Some(std::mem::replace(existing, content));
        }

        self.entries.push((path, content));
        None
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for FileContents {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut contents = Self::new();
        for (path, content) in iter {
            contents.insert(path, content);
        }
        contents
    }
}

/// Parse every file and aggregate the results.
///
/// With `explicit_order`, paths missing from `contents` are dropped and the
/// remaining ones (duplicates included) define the file order. Without it,
/// the insertion order of `contents` is used.
pub fn collect_tasks(contents: &FileContents, explicit_order: Option<&[String]>) -> TaskCollection {
    let file_order: Vec<String> = match explicit_order {
        Some(order) => order
            .iter()
            .filter(|path| contents.contains(path))
            .cloned()
            .collect(),
        None => contents.paths().map(str::to_string).collect(),
    };

    let mut all_tasks = Vec::new();
    let mut tasks_by_file: Vec<FileTasks> = Vec::new();
    let mut counts = TaskCounts::default();

    for file_path in &file_order {
        let content = contents.get(file_path).unwrap_or_default();
        let processed = process_file(content);

        let file_tasks: Vec<FileTask> = processed
            .tasks
            .into_iter()
            .map(|task| FileTask::new(task, file_path))
            .collect();

        debug!(
            "Collected {} tasks ({} completed) from {}",
            processed.counts.total, processed.counts.completed, file_path
        );

        all_tasks.extend(file_tasks.iter().cloned());
        match tasks_by_file.iter_mut().find(|entry| entry.file_path == *file_path) {
            Some(entry) => entry.tasks = file_tasks,
            None => tasks_by_file.push(FileTasks {
                file_path: file_path.clone(),
                tasks: file_tasks,
            }),
        }

        counts += processed.counts;
    }

    let position: HashMap<&str, usize> = file_order
        .iter()
        .enumerate()
        .rev()
        .map(|(index, path)| (path.as_str(), index))
        .collect();
    all_tasks.sort_by_key(|task| {
        (
            position.get(task.file_path.as_str()).copied().unwrap_or(usize::MAX),
            task.task.line_number,
        )
    });

    let summary = TaskSummary::new(contents.len(), counts);

    TaskCollection {
        all_tasks,
        tasks_by_file,
        file_order,
        summary,
    }
}

impl TaskCollection {
    /// Each root followed by its descendants in depth-first line order
    pub fn flatten_with_descendants<'a>(&'a self, roots: &[&'a FileTask]) -> Vec<&'a FileTask> {
        flatten_with_descendants(roots, |task| self.children_of(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(files: &[(&str, &str)]) -> FileContents {
        files.iter().copied().collect()
    }

    #[test]
    fn test_file_contents_replace_keeps_position() {
        let mut files = FileContents::new();
        files.insert("a.md", "one");
        files.insert("b.md", "two");
        let old = files.insert("a.md", "three");

        assert_eq!(old.as_deref(), Some("one"));
        assert_eq!(files.len(), 2);
        assert_eq!(files.paths().collect::<Vec<_>>(), vec!["a.md", "b.md"]);
        assert_eq!(files.get("a.md"), Some("three"));
    }

    #[test]
    fn test_natural_order_without_explicit_order() {
        let files = contents(&[("z.md", "- [ ] z"), ("a.md", "- [ ] a")]);
        let collection = collect_tasks(&files, None);

        assert_eq!(collection.file_order, vec!["z.md", "a.md"]);
        assert_eq!(collection.all_tasks[0].file_name, "z.md");
        assert_eq!(collection.all_tasks[1].file_name, "a.md");
    }

    #[test]
    fn test_duplicate_order_entries_are_kept() {
        let files = contents(&[("a.md", "- [x] a")]);
        let order = vec!["a.md".to_string(), "a.md".to_string()];
        let collection = collect_tasks(&files, Some(&order));

        assert_eq!(collection.file_order, order);
        assert_eq!(collection.all_tasks.len(), 2);
        assert_eq!(collection.tasks_by_file.len(), 1);
        assert_eq!(collection.summary.total_files, 1);
        assert_eq!(collection.summary.total_tasks, 2);
    }

    #[test]
    fn test_interleaved_duplicate_sorts_by_first_position() {
        let files = contents(&[("a.md", "- [ ] a1\n- [x] a2"), ("b.md", "- [ ] b1")]);
        let order = vec!["a.md".to_string(), "b.md".to_string(), "a.md".to_string()];
        let collection = collect_tasks(&files, Some(&order));

        let sequence: Vec<(&str, &str)> = collection
            .all_tasks
            .iter()
            .map(|task| (task.file_path.as_str(), task.task.content.as_str()))
            .collect();
        assert_eq!(
            sequence,
            vec![
                ("a.md", "a1"),
                ("a.md", "a1"),
                ("a.md", "a2"),
                ("a.md", "a2"),
                ("b.md", "b1"),
            ]
        );

        let by_file: Vec<&str> = collection
            .tasks_by_file
            .iter()
            .map(|entry| entry.file_path.as_str())
            .collect();
        assert_eq!(by_file, vec!["a.md", "b.md"]);
        assert_eq!(collection.file_order, order);
        assert_eq!(collection.summary.total_tasks, 5);
        assert_eq!(collection.summary.completed_tasks, 2);
        assert_eq!(collection.summary.total_files, 2);
    }

    #[test]
    fn test_file_tasks_carry_path_and_name() {
        let files = contents(&[("notes/todo.md", "# Work\n- [ ] ship")]);
        let collection = collect_tasks(&files, None);
        let task = &collection.all_tasks[0];

        assert_eq!(task.file_path, "notes/todo.md");
        assert_eq!(task.file_name, "todo.md");
        assert_eq!(task.task.context, "Work");
        assert_eq!(task.task.line_number, 2);
    }

    #[test]
    fn test_collection_lookups_follow_links() {
        let files = contents(&[("a.md", "- [ ] parent\n  - [x] child")]);
        let collection = collect_tasks(&files, None);

        let parent = collection.find("a.md", 1).unwrap();
        let children = collection.children_of(parent);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].task.content, "child");
        assert_eq!(collection.parent_of(children[0]), Some(parent));
        assert!(collection.find("a.md", 3).is_none());
        assert!(collection.find("missing.md", 1).is_none());
    }
}
