//! CLI-specific functionality for cowtodo
//!
//! This module contains all CLI-related code including argument parsing,
//! markdown file loading, and configuration discovery.

pub mod args;
pub mod config;
pub mod files;

pub use args::{Args, ExecutionMode, RenderConfig};
pub use config::{ConfigDiscovery, CowtodoConfig, DisplayConfig, Layout, WatchConfig};
pub use files::{FileError, FileLoader, LoadReport};
