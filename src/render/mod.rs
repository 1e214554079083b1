//! Terminal output
//!
//! Turns a [`TaskCollection`](crate::task::TaskCollection) and any per-file load
//! errors into text, optionally spoken by the cow.

pub mod cow;
pub mod list;

pub use cow::{CowStyle, say};
pub use list::{CompletionFilter, RenderOptions, render_collection};

use crate::cli::files::LoadReport;
use crate::task::TaskCollection;

pub const WELCOME_MESSAGE: &str = "Welcome to CowTodo! Please provide a file path to read.";

/// Renders collections, errors and notices with a fixed configuration
#[derive(Debug, Clone)]
pub struct Renderer {
    pub options: RenderOptions,
    /// `None` prints plain text without the cow
    pub cow: Option<CowStyle>,
}

impl Renderer {
    pub fn new(options: RenderOptions, cow: Option<CowStyle>) -> Self {
        Self { options, cow }
    }

    /// Errors first, one per failed path, then the task list
    pub fn render(&self, report: &LoadReport, collection: &TaskCollection) -> String {
        let mut sections: Vec<String> = report
            .errors
            .iter()
            .map(|(_, error)| self.error(&error.to_string()))
            .collect();

        if !report.contents.is_empty() || report.errors.is_empty() {
            let text = render_collection(collection, &self.options);
            sections.push(self.speak(&text));
        }

        sections.join("\n")
    }

    pub fn error(&self, message: &str) -> String {
        let text = format!("Error: {message}");
        match &self.cow {
            Some(style) => say(
                &text,
                &style
                    .clone()
                    .with_eyes(cow::ERROR_EYES)
                    .with_tongue(cow::ERROR_TONGUE),
            ),
            None => format!("{text}\n"),
        }
    }

    pub fn welcome(&self) -> String {
        match &self.cow {
            Some(style) => say(
                WELCOME_MESSAGE,
                &style
                    .clone()
                    .with_eyes(cow::WELCOME_EYES)
                    .with_tongue(cow::WELCOME_TONGUE),
            ),
            None => format!("{WELCOME_MESSAGE}\n"),
        }
    }

    /// Highlight line naming the files that changed since the last render
    pub fn update_notice(&self, changed: &[String]) -> String {
        format!("Updated: {}\n", changed.join(", "))
    }

    fn speak(&self, text: &str) -> String {
        match &self.cow {
            Some(style) => say(text, style),
            None => format!("{text}\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::files::FileError;
    use crate::task::{FileContents, collect_tasks};
    use std::path::PathBuf;

    fn report(files: &[(&str, &str)], missing: &[&str]) -> LoadReport {
        LoadReport {
            contents: files.iter().copied().collect::<FileContents>(),
            errors: missing
                .iter()
                .map(|p| {
                    (
                        p.to_string(),
                        FileError::NotFound {
                            path: PathBuf::from(*p),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_plain_render_includes_errors_and_tasks() {
        let report = report(&[("a.md", "- [ ] one")], &["gone.md"]);
        let collection = collect_tasks(&report.contents, None);
        let renderer = Renderer::new(RenderOptions::default(), None);

        let out = renderer.render(&report, &collection);
        assert!(out.starts_with("Error: File not found: gone.md\n"));
        assert!(out.contains("- [ ] one"));
    }

    #[test]
    fn test_only_errors_skips_task_list() {
        let report = report(&[], &["gone.md"]);
        let collection = collect_tasks(&report.contents, None);
        let renderer = Renderer::new(RenderOptions::default(), Some(CowStyle::default()));

        let out = renderer.render(&report, &collection);
        assert!(out.contains("(xx)"));
        assert!(out.contains("U  ||----w |"));
        assert!(!out.contains(list::NO_TASKS));
    }

    #[test]
    fn test_cow_wraps_task_list() {
        let report = report(&[("a.md", "- [x] one")], &[]);
        let collection = collect_tasks(&report.contents, None);
        let renderer = Renderer::new(RenderOptions::default(), Some(CowStyle::default()));

        let out = renderer.render(&report, &collection);
        assert!(out.contains("(oo)"));
        assert!(out.contains("\\ - [x] one"));
    }

    #[test]
    fn test_welcome() {
        let renderer = Renderer::new(RenderOptions::default(), Some(CowStyle::default()));
        let out = renderer.welcome();
        assert!(out.contains("(^^)"));
        assert!(out.contains("U  ||----w |"));

        let plain = Renderer::new(RenderOptions::default(), None);
        assert_eq!(plain.welcome(), format!("{WELCOME_MESSAGE}\n"));
    }
}
