//! Markdown file loading
//!
//! Reads the files named on the command line into immutable snapshots. A file
//! that cannot be read is reported on its own and never aborts the batch.

use crate::task::FileContents;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("File path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("File '{}' is not UTF-8 encoded: {hint}", path.display())]
    NotUtf8 { path: PathBuf, hint: String },

    #[error("Failed to read file: {} - {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            FileError::NotFound { path }
            | FileError::NonUtf8Path { path }
            | FileError::NotUtf8 { path, .. }
            | FileError::IoError { path, .. } => path,
        }
    }
}

/// Outcome of loading a batch of files
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully read files, keyed by the path as given
    pub contents: FileContents,
    /// Files that could not be read, in request order
    pub errors: Vec<(String, FileError)>,
}

impl LoadReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Loads markdown files for task collection
pub struct FileLoader;

impl FileLoader {
    /// Load a UTF-8 file with proper error handling
    pub fn load_utf8_file<P: AsRef<Path>>(path: P) -> Result<String, FileError> {
        let path = path.as_ref().to_path_buf();

        debug!("Loading UTF-8 file: {:?}", path);

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(
                    "Successfully loaded {} characters from {:?}",
                    content.len(),
                    path
                );
                Ok(content)
            }
            Err(e) => match e.kind() {
                std::io::ErrorKind::NotFound => Err(FileError::NotFound { path }),
                std::io::ErrorKind::InvalidData => Err(FileError::NotUtf8 {
                    path,
                    hint: "File appears to be binary. Only UTF-8 markdown files are supported."
                        .to_string(),
                }),
                _ => Err(FileError::IoError { path, source: e }),
            },
        }
    }

    /// Load every path, collecting failures per path.
    ///
    /// Contents are keyed by the path string, so paths that are not valid UTF-8
    /// are rejected instead of being keyed lossily.
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> LoadReport {
        let mut report = LoadReport::default();

        for path in paths {
            let path = path.as_ref();
            let Some(key) = path.to_str().map(str::to_string) else {
                let e = FileError::NonUtf8Path {
                    path: path.to_path_buf(),
                };
                warn!("Skipping {}", e);
                report.errors.push((path.to_string_lossy().into_owned(), e));
                continue;
            };

            match Self::load_utf8_file(path) {
                Ok(content) => {
                    report.contents.insert(key, content);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", key, e);
                    report.errors.push((key, e));
                }
            }
        }

        debug!(
            "Loaded {} files, {} failed",
            report.contents.len(),
            report.errors.len()
        );
        report
    }

    /// The caller's file order as content-map keys, skipping non-UTF-8 paths
    pub fn file_order<P: AsRef<Path>>(paths: &[P]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|path| path.as_ref().to_str())
            .map(str::to_string)
            .collect()
    }
}
