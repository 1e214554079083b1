use serde::{Deserialize, Serialize};

/// 1-based line number of a task inside its source file.
///
/// Line numbers are unique within one file, so they double as the identifier
/// used for parent/child links.
pub type LineNumber = usize;

/// A checkbox item parsed from one markdown line
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// The full line, trimmed
    pub text: String,
    /// Everything after the checkbox marker, trimmed
    pub content: String,
    pub completed: bool,
    pub line_number: LineNumber,
    /// Nesting level, one per two characters of leading whitespace
    pub indent: usize,
    /// Nearest active heading, empty when the line precedes every heading
    pub context: String,
    /// Line number of the enclosing task
    pub parent: Option<LineNumber>,
    /// Line numbers of the direct children, in source order
    pub children: Vec<LineNumber>,
    pub all_children_complete: bool,
    /// `completed` and every descendant effectively complete
    pub effectively_complete: bool,
}

impl Task {
    /// Create an unlinked task record as produced by the line extractor
    pub fn new(
        text: impl Into<String>,
        content: impl Into<String>,
        completed: bool,
        line_number: LineNumber,
        indent: usize,
    ) -> Self {
        Self {
            text: text.into(),
            content: content.into(),
            completed,
            line_number,
            indent,
            context: String::new(),
            parent: None,
            children: Vec::new(),
            all_children_complete: true,
            effectively_complete: completed,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Markdown checkbox for this task's own state
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

impl AsRef<Task> for Task {
    fn as_ref(&self) -> &Task {
        self
    }
}

/// Raw completion counts for a list of tasks
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskCounts {
    /// Tasks whose own checkbox is ticked, ignoring children
    pub completed: usize,
    pub total: usize,
}

impl TaskCounts {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut counts, task| {
            counts.total += 1;
            if task.completed {
                counts.completed += 1;
            }
            counts
        })
    }
}

impl std::ops::AddAssign for TaskCounts {
    fn add_assign(&mut self, other: Self) {
        self.completed += other.completed;
        self.total += other.total;
    }
}

/// Output of processing one file: linked tasks plus counts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProcessedFile {
    /// Tasks in source order, context-annotated and hierarchy-linked
    pub tasks: Vec<Task>,
    pub counts: TaskCounts,
}

impl ProcessedFile {
    /// Look up a task by its line number
    pub fn task(&self, line_number: LineNumber) -> Option<&Task> {
        find_by_line(&self.tasks, line_number)
    }

    pub fn roots(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.is_root()).collect()
    }

    pub fn children(&self, task: &Task) -> Vec<&Task> {
        task.children
            .iter()
            .filter_map(|&line| self.task(line))
            .collect()
    }

    pub fn parent(&self, task: &Task) -> Option<&Task> {
        task.parent.and_then(|line| self.task(line))
    }
}

/// A task together with the file it came from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileTask {
    #[serde(flatten)]
    pub task: Task,
    pub file_path: String,
    pub file_name: String,
}

impl FileTask {
    pub fn new(task: Task, file_path: &str) -> Self {
        Self {
            task,
            file_path: file_path.to_string(),
            file_name: file_name(file_path).to_string(),
        }
    }
}

impl AsRef<Task> for FileTask {
    fn as_ref(&self) -> &Task {
        &self.task
    }
}

/// Last `/`-separated segment of a path, or the path itself when that segment is empty
pub fn file_name(file_path: &str) -> &str {
    match file_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => file_path,
    }
}

/// Tasks recorded for one file, in source order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileTasks {
    pub file_path: String,
    pub tasks: Vec<FileTask>,
}

/// Aggregate totals over a whole collection
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total_files: usize,
    pub total_tasks: usize,
    /// Counts raw `completed`, not `effectively_complete`
    pub completed_tasks: usize,
    pub completion_percentage: u32,
}

impl TaskSummary {
    pub fn new(total_files: usize, counts: TaskCounts) -> Self {
        let completion_percentage = if counts.total == 0 {
            0
        } else {
            (counts.completed as f64 / counts.total as f64 * 100.0).round() as u32
        };

        Self {
            total_files,
            total_tasks: counts.total,
            completed_tasks: counts.completed,
            completion_percentage,
        }
    }
}

/// Tasks from many files, ordered by the caller's file order
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskCollection {
    /// Every task, sorted by (position in `file_order`, line number)
    pub all_tasks: Vec<FileTask>,
    /// Per-file task lists in processing order
    pub tasks_by_file: Vec<FileTasks>,
    /// Paths actually processed, in order
    pub file_order: Vec<String>,
    pub summary: TaskSummary,
}

impl TaskCollection {
    pub fn is_empty(&self) -> bool {
        self.all_tasks.is_empty()
    }

    pub fn tasks_for_file(&self, file_path: &str) -> Option<&[FileTask]> {
        self.tasks_by_file
            .iter()
            .find(|entry| entry.file_path == file_path)
            .map(|entry| entry.tasks.as_slice())
    }

    /// Look up a task by file and line number
    pub fn find(&self, file_path: &str, line_number: LineNumber) -> Option<&FileTask> {
        self.tasks_for_file(file_path)
            .and_then(|tasks| find_by_line(tasks, line_number))
    }

    /// Tasks without a parent, in global order
    pub fn root_tasks(&self) -> Vec<&FileTask> {
        self.all_tasks
            .iter()
            .filter(|task| task.task.is_root())
            .collect()
    }

    pub fn children_of(&self, task: &FileTask) -> Vec<&FileTask> {
        task.task
            .children
            .iter()
            .filter_map(|&line| self.find(&task.file_path, line))
            .collect()
    }

    pub fn parent_of(&self, task: &FileTask) -> Option<&FileTask> {
        task.task
            .parent
            .and_then(|line| self.find(&task.file_path, line))
    }
}

fn find_by_line<T: AsRef<Task>>(tasks: &[T], line_number: LineNumber) -> Option<&T> {
    tasks
        .binary_search_by_key(&line_number, |task| task.as_ref().line_number)
        .ok()
        .map(|index| &tasks[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_extraction() {
        assert_eq!(file_name("docs/todo.md"), "todo.md");
        assert_eq!(file_name("/abs/path/notes.md"), "notes.md");
        assert_eq!(file_name("README.md"), "README.md");
        assert_eq!(file_name("dir/"), "dir/");
    }

    #[test]
    fn test_summary_percentage() {
        let summary = TaskSummary::new(
            2,
            TaskCounts {
                completed: 1,
                total: 3,
            },
        );
        assert_eq!(summary.completion_percentage, 33);

        let summary = TaskSummary::new(
            1,
            TaskCounts {
                completed: 1,
                total: 8,
            },
        );
        assert_eq!(summary.completion_percentage, 13);

        let empty = TaskSummary::new(1, TaskCounts::default());
        assert_eq!(empty.completion_percentage, 0);
    }

    #[test]
    fn test_counts_ignore_children() {
        let mut parent = Task::new("- [x] a", "a", true, 1, 0);
        parent.effectively_complete = false;
        let child = Task::new("  - [ ] b", "b", false, 2, 1);

        let counts = TaskCounts::from_tasks([&parent, &child]);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.total, 2);
    }
}
