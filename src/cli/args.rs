//! Command line argument parsing
//!
//! `cowtodo <files>...` renders the checkbox tasks found in the given markdown
//! files. Flags select the layout and filters; anything not given on the
//! command line falls back to the discovered configuration.

use super::config::{CowtodoConfig, Layout};
use crate::render::{CompletionFilter, CowStyle, RenderOptions};
use crate::task::SortBy;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, PartialEq)]
pub enum ExecutionMode {
    /// No files given
    Welcome(RenderConfig),
    Render(RenderConfig),
    Watch(RenderConfig),
    ShowConfig,
}

/// Everything needed to load, render and optionally watch a set of files
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub files: Vec<PathBuf>,
    pub options: RenderOptions,
    pub cow: Option<CowStyle>,
    pub json: bool,
    pub debounce: Duration,
}

#[derive(Debug, Parser)]
#[command(name = "cowtodo")]
#[command(author = "cowtodo contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect markdown checkbox tasks and have a cow read them to you")]
#[command(after_help = "Examples:\n  cowtodo README.md\n  cowtodo docs/todo.md notes.md --details\n  cowtodo todo.md --watch --no-cow")]
pub struct Args {
    /// Markdown files to read, in display order
    pub files: Vec<PathBuf>,
    /// Show verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
    /// Group tasks by file instead of Backlog/Done
    #[arg(short = 'd', long = "details", conflicts_with = "group_by_context")]
    pub details: bool,
    /// Group tasks by their nearest heading
    #[arg(short = 'g', long = "group-by-context")]
    pub group_by_context: bool,
    /// Sort tasks before display
    #[arg(short = 's', long = "sort", value_enum)]
    pub sort: Option<SortBy>,
    /// Show only pending or only completed tasks
    #[arg(long = "filter", value_enum)]
    pub filter: Option<CompletionFilter>,
    /// Print the task collection as JSON
    #[arg(long = "json")]
    pub json: bool,
    /// Print plain text without the cow
    #[arg(long = "no-cow")]
    pub no_cow: bool,
    /// Re-render whenever a file changes
    #[arg(short = 'w', long = "watch")]
    pub watch: bool,
    /// Configuration file path
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Show configuration discovery information
    #[arg(long = "show-config")]
    pub show_config: bool,
}

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Resolve flags against the loaded configuration
    pub fn mode(&self, config: &CowtodoConfig) -> ExecutionMode {
        if self.show_config {
            return ExecutionMode::ShowConfig;
        }

        let render = self.render_config(config);
        if self.files.is_empty() {
            ExecutionMode::Welcome(render)
        } else if self.watch {
            ExecutionMode::Watch(render)
        } else {
            ExecutionMode::Render(render)
        }
    }

    fn render_config(&self, config: &CowtodoConfig) -> RenderConfig {
        let display = &config.display;

        let layout = if self.details {
            Layout::Details
        } else if self.group_by_context {
            Layout::Context
        } else {
            display.layout
        };

        let cow = (display.cow && !self.no_cow && !self.json).then(|| CowStyle {
            eyes: display.eyes.clone(),
            wrap_width: display.wrap_width,
            ..CowStyle::default()
        });

        RenderConfig {
            files: self.files.clone(),
            options: RenderOptions {
                layout,
                sort: self.sort.or(display.sort),
                filter: self.filter,
                verbose: self.verbose,
            },
            cow,
            json: self.json,
            debounce: config.watch.debounce(),
        }
    }
}
