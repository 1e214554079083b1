//! # cowtodo
//!
//! Collects markdown checkbox tasks (`- [ ]` / `- [x]`) from one or more files,
//! rebuilds their nesting from indentation, and prints them as a Backlog/Done
//! list, optionally spoken by an ASCII cow.
//!
//! ## Architecture Overview
//!
//! - **[`task`]**: line extraction, heading context, hierarchy and multi-file
//!   aggregation. Pure functions over strings; never fails.
//! - **[`cli`]**: argument parsing, configuration discovery and file loading
//! - **[`render`]**: list layouts and the cow
//! - **[`watch`]**: event-driven re-render on file changes
//!
//! ## Quick Start
//!
//! ```rust
//! use cowtodo::task::{FileContents, collect_tasks};
//!
//! let mut files = FileContents::new();
//! files.insert("todo.md", "# Errands\n- [ ] Buy milk\n  - [x] 2% milk\n- [x] Pay rent\n");
//!
//! let collection = collect_tasks(&files, None);
//! assert_eq!(collection.summary.total_tasks, 3);
//! assert_eq!(collection.summary.completed_tasks, 2);
//! assert_eq!(collection.root_tasks().len(), 2);
//! ```

/// Markdown task extraction, hierarchy and aggregation.
pub mod task;

/// Command-line arguments, configuration and file loading.
pub mod cli;

/// Text and cow rendering of task collections.
pub mod render;

/// File system watcher for live re-rendering.
pub mod watch;

/// Configuration paths and logging defaults.
pub mod env;

pub use task::{
    FileContents, FileTask, ProcessedFile, SortBy, Task, TaskCollection, TaskCounts, TaskSummary,
    collect_tasks, extract_heading_context, extract_tasks, process_file,
};

pub use render::{RenderOptions, Renderer};
