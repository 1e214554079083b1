use crate::task::types::{LineNumber, Task};
use tracing::debug;

/// Link tasks into a forest based on indentation and derive completion flags.
///
/// `tasks` must be in source order. A task's parent is the nearest preceding
/// task still open on the indent stack with a strictly smaller indent; tasks
/// with no such predecessor become roots. Returns the root line numbers.
pub fn build_hierarchy(tasks: &mut [Task]) -> Vec<LineNumber> {
    let mut roots = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for index in 0..tasks.len() {
        let indent = tasks[index].indent;
        while stack.last().is_some_and(|&top| tasks[top].indent >= indent) {
            stack.pop();
        }

        match stack.last() {
            Some(&parent) => {
                let line = tasks[index].line_number;
                let parent_line = tasks[parent].line_number;
                tasks[parent].children.push(line);
                tasks[index].parent = Some(parent_line);
            }
            None => roots.push(tasks[index].line_number),
        }

        stack.push(index);
    }

    propagate_completion(tasks);

    debug!(
        "Linked {} tasks into {} root trees",
        tasks.len(),
        roots.len()
    );
    roots
}

/// Post-order completion pass.
///
/// Children always follow their parent in source order, so walking the list
/// backwards visits every child before its parent.
fn propagate_completion(tasks: &mut [Task]) {
    for index in (0..tasks.len()).rev() {
        let all_children_complete = tasks[index].children.iter().all(|&line| {
            tasks[index + 1..]
                .binary_search_by_key(&line, |task| task.line_number)
                .map(|offset| tasks[index + 1 + offset].effectively_complete)
                .unwrap_or(true)
        });

        let task = &mut tasks[index];
        task.all_children_complete = all_children_complete;
        task.effectively_complete = task.completed && all_children_complete;
    }
}

/// Flatten roots into display order: each root followed by all of its
/// descendants, depth-first, with siblings ordered by line number.
///
/// Roots keep the order they are given in.
pub fn flatten_with_descendants<'a, T, F>(roots: &[&'a T], children_of: F) -> Vec<&'a T>
where
    T: AsRef<Task>,
    F: Fn(&'a T) -> Vec<&'a T>,
{
    let mut result = Vec::new();
    for &root in roots {
        result.push(root);
        push_descendants(root, &children_of, &mut result);
    }
    result
}

fn push_descendants<'a, T, F>(parent: &'a T, children_of: &F, result: &mut Vec<&'a T>)
where
    T: AsRef<Task>,
    F: Fn(&'a T) -> Vec<&'a T>,
{
    let mut children = children_of(parent);
    children.sort_by_key(|child| child.as_ref().line_number);

    for child in children {
        result.push(child);
        push_descendants(child, children_of, result);
    }
}
