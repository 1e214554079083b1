//! Line-level markdown scanning
//!
//! Recognizes checkbox list items and headings. This is a line heuristic, not a
//! markdown parser: list structure is inferred later from indentation alone.

use crate::task::tree::build_hierarchy;
use crate::task::types::{LineNumber, ProcessedFile, Task, TaskCounts};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `- [ ] content` or `* [x] content`, with leading whitespace captured
static TASK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)[-*] \[(.)\] (.+)$").expect("valid task line regex")
});

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading regex")
});

/// Heading text active at each line, keyed by 1-based line number
pub type HeadingContext = BTreeMap<LineNumber, String>;

/// Extract checkbox tasks from markdown text, in source order.
///
/// The returned tasks are unlinked: no parents, no children, and
/// `effectively_complete` equal to `completed`.
pub fn extract_tasks(text: &str) -> Vec<Task> {
    text.split('\n')
        .enumerate()
        .filter_map(|(index, line)| parse_task_line(line, index + 1))
        .collect()
}

fn parse_task_line(line: &str, line_number: LineNumber) -> Option<Task> {
    let captures = TASK_LINE_RE.captures(line)?;
    let leading = captures.get(1).map_or("", |m| m.as_str());
    let check = captures.get(2).map_or("", |m| m.as_str());
    let content = captures.get(3).map_or("", |m| m.as_str());

    Some(Task::new(
        line.trim(),
        content.trim(),
        check.eq_ignore_ascii_case("x"),
        line_number,
        leading.chars().count() / 2,
    ))
}

/// Map every line to the heading active at that line.
///
/// A heading replaces the tracked one only if it is at the same or a shallower
/// level (or nothing has been tracked yet). Deeper headings are ignored.
pub fn extract_heading_context(text: &str) -> HeadingContext {
    let mut context = HeadingContext::new();
    let mut current_heading = String::new();
    let mut current_level = 0;

    for (index, line) in text.split('\n').enumerate() {
        if let Some(captures) = HEADING_RE.captures(line) {
            let level = captures.get(1).map_or(0, |m| m.as_str().len());
            if current_level == 0 || level <= current_level {
                current_heading = captures
                    .get(2)
                    .map_or("", |m| m.as_str())
                    .trim()
                    .to_string();
                current_level = level;
            }
        }

        context.insert(index + 1, current_heading.clone());
    }

    context
}

/// Extract, annotate and link the tasks of one file
pub fn process_file(text: &str) -> ProcessedFile {
    let mut tasks = extract_tasks(text);
    let headings = extract_heading_context(text);

    for task in &mut tasks {
        task.context = headings
            .get(&task.line_number)
            .cloned()
            .unwrap_or_default();
    }

    build_hierarchy(&mut tasks);
    let counts = TaskCounts::from_tasks(&tasks);

    ProcessedFile { tasks, counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic_checkboxes() {
        let tasks = extract_tasks("- [ ] Open\n- [x] Done\n* [X] Star done\n");

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].content, "Open");
        assert!(!tasks[0].completed);
        assert!(tasks[1].completed);
        assert!(tasks[2].completed);
        assert_eq!(tasks[2].text, "* [X] Star done");
    }

    #[test]
    fn test_line_numbers_skip_non_tasks() {
        let text = "# Title\n\nSome prose\n- [ ] first\n- plain item\n- [x] second";
        let tasks = extract_tasks(text);

        let lines: Vec<_> = tasks.iter().map(|t| t.line_number).collect();
        assert_eq!(lines, vec![4, 6]);
    }

    #[test]
    fn test_indent_is_half_the_leading_whitespace() {
        let text = "- [ ] a\n  - [ ] b\n   - [ ] c\n    - [ ] d\n\t- [ ] e";
        let indents: Vec<_> = extract_tasks(text).iter().map(|t| t.indent).collect();
        assert_eq!(indents, vec![0, 1, 1, 2, 0]);
    }

    #[test]
    fn test_other_check_characters_are_incomplete() {
        let tasks = extract_tasks("- [-] cancelled\n- [?] unsure");
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_rejects_malformed_items() {
        let text = "-[ ] no space\n- [] empty box\n- [ ]\n1. [ ] ordered\n+ [ ] plus";
        assert!(extract_tasks(text).is_empty());
    }

    #[test]
    fn test_content_and_text_are_trimmed() {
        let tasks = extract_tasks("    - [ ]   padded content   \r");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].content, "padded content");
        assert_eq!(tasks[0].text, "- [ ]   padded content");
        assert_eq!(tasks[0].indent, 2);
    }

    #[test]
    fn test_unlinked_defaults() {
        let tasks = extract_tasks("- [x] a\n- [ ] b");
        assert!(tasks.iter().all(|t| t.parent.is_none() && t.children.is_empty()));
        assert!(tasks.iter().all(|t| t.all_children_complete));
        assert!(tasks[0].effectively_complete);
        assert!(!tasks[1].effectively_complete);
    }

    #[test]
    fn test_heading_context_covers_every_line() {
        let context = extract_heading_context("intro\n# Plan\nbody\n");

        assert_eq!(context.len(), 4);
        assert_eq!(context[&1], "");
        assert_eq!(context[&2], "Plan");
        assert_eq!(context[&3], "Plan");
        assert_eq!(context[&4], "Plan");
    }

    #[test]
    fn test_deeper_heading_does_not_override() {
        let context = extract_heading_context("## Two\n### Three\n# One\n## Two again");
        assert_eq!(context[&1], "Two");
        assert_eq!(context[&2], "Two");
        assert_eq!(context[&3], "One");
        assert_eq!(context[&4], "One");
    }

    #[test]
    fn test_heading_requires_whitespace() {
        let context = extract_heading_context("#NoSpace\n####### Seven\n# Real");
        assert_eq!(context[&1], "");
        assert_eq!(context[&2], "");
        assert_eq!(context[&3], "Real");
    }

    #[test]
    fn test_process_file_counts_raw_completion() {
        let processed = process_file("- [ ] Buy milk\n  - [x] 2% milk\n- [x] Pay rent\n");
        assert_eq!(processed.counts, TaskCounts { completed: 2, total: 3 });
        assert_eq!(processed.roots().len(), 2);
    }

    #[test]
    fn test_process_empty_text() {
        let processed = process_file("");
        assert!(processed.tasks.is_empty());
        assert_eq!(processed.counts, TaskCounts::default());
    }
}
