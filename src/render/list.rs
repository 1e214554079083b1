//! Plain-text task list layouts

use crate::cli::config::Layout;
use crate::task::{
    FileTask, SortBy, TaskCollection, TaskSummary, filter_by_completion, group_by_context,
    sort_tasks,
};
use serde::{Deserialize, Serialize};

pub const NO_TASKS: &str = "No tasks found in the provided files.";
pub const NO_PENDING: &str = "No pending tasks";
pub const NO_COMPLETED: &str = "No completed tasks";

/// Restrict output to pending or completed tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFilter {
    Pending,
    Done,
}

impl CompletionFilter {
    fn completed(self) -> bool {
        matches!(self, CompletionFilter::Done)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout: Layout,
    pub sort: Option<SortBy>,
    pub filter: Option<CompletionFilter>,
    /// Prefix the output with a summary line
    pub verbose: bool,
}

/// Render a collection as text, without a trailing newline
pub fn render_collection(collection: &TaskCollection, options: &RenderOptions) -> String {
    let mut out = String::new();

    if options.verbose {
        out.push_str(&summary_line(&collection.summary));
        out.push_str("\n\n");
    }

    if collection.is_empty() {
        out.push_str(NO_TASKS);
        return out;
    }

    match options.layout {
        Layout::Standard => render_standard(collection, options, &mut out),
        Layout::Details => render_details(collection, options, &mut out),
        Layout::Context => render_by_context(collection, options, &mut out),
    }

    out.truncate(out.trim_end().len());
    out
}

pub fn summary_line(summary: &TaskSummary) -> String {
    format!(
        "{}/{} tasks complete ({}%) across {} file(s)",
        summary.completed_tasks,
        summary.total_tasks,
        summary.completion_percentage,
        summary.total_files
    )
}

/// `- [ ] content`, indented two spaces per level
pub fn task_line(task: &FileTask) -> String {
    format!(
        "{}- {} {}",
        "  ".repeat(task.task.indent),
        task.task.checkbox(),
        task.task.content
    )
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn render_standard(collection: &TaskCollection, options: &RenderOptions, out: &mut String) {
    let mut roots = collection.root_tasks();
    if let Some(sort_by) = options.sort {
        roots = sort_tasks(roots, sort_by);
    }
    let (done, backlog): (Vec<&FileTask>, Vec<&FileTask>) = roots
        .into_iter()
        .partition(|task| task.task.effectively_complete);

    if options.filter != Some(CompletionFilter::Done) {
        out.push_str("## Backlog\n\n");
        if backlog.is_empty() {
            out.push_str(NO_PENDING);
            out.push('\n');
        }
        for task in collection.flatten_with_descendants(&backlog) {
            push_line(out, &task_line(task));
        }
        out.push('\n');
    }

    if options.filter != Some(CompletionFilter::Pending) {
        out.push_str("## Done\n\n");
        if done.is_empty() {
            out.push_str(NO_COMPLETED);
            out.push('\n');
        }
        for task in done {
            push_line(out, &task_line(task));
        }
    }
}

fn select<'a>(
    tasks: impl IntoIterator<Item = &'a FileTask>,
    options: &RenderOptions,
) -> Vec<&'a FileTask> {
    let mut selected: Vec<&FileTask> = match options.filter {
        Some(filter) => filter_by_completion(tasks, filter.completed()),
        None => tasks.into_iter().collect(),
    };
    if let Some(sort_by) = options.sort {
        selected = sort_tasks(selected, sort_by);
    }
    selected
}

fn render_details(collection: &TaskCollection, options: &RenderOptions, out: &mut String) {
    for file_path in &collection.file_order {
        let tasks = select(
            collection.tasks_for_file(file_path).unwrap_or_default(),
            options,
        );
        if tasks.is_empty() {
            continue;
        }

        out.push_str(&format!("{} ({})\n\n", file_path, tasks.len()));
        for task in tasks {
            push_line(out, &task_line(task));
        }
        out.push('\n');
    }
}

fn render_by_context(collection: &TaskCollection, options: &RenderOptions, out: &mut String) {
    let tasks = select(&collection.all_tasks, options);

    for group in group_by_context(tasks) {
        out.push_str(&format!("### {} ({})\n\n", group.context, group.tasks.len()));
        for task in group.tasks {
            push_line(out, &format!("{}  ({})", task_line(task), task.file_name));
        }
        out.push('\n');
    }
}
