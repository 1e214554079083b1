//! Event-driven file watcher
//!
//! Subscribes to file system notifications for the directories holding the
//! watched files and reports which files changed content. Events that leave a
//! file's content unchanged are dropped. Every reported change triggers a full
//! re-parse of all files; nothing is carried over between renders.

use crate::cli::files::FileLoader;
use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

/// What a file looked like when last read
#[derive(Debug, Clone, PartialEq, Eq)]
enum Snapshot {
    Content(String),
    Unreadable(String),
}

impl Snapshot {
    fn read(path: &Path) -> Self {
        match FileLoader::load_utf8_file(path) {
            Ok(content) => Snapshot::Content(content),
            Err(e) => Snapshot::Unreadable(e.to_string()),
        }
    }
}

/// Directory plus file name, matching the paths notify reports
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FileKey {
    dir: PathBuf,
    name: OsString,
}

impl FileKey {
    /// Key for a user-supplied path, resolving its directory
    fn resolve(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_os_string();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let dir = parent
            .canonicalize()
            .or_else(|_| std::path::absolute(&parent))
            .ok()?;
        Some(Self { dir, name })
    }

    /// Key for a path from a notify event, which is already absolute
    fn from_event_path(path: &Path) -> Option<Self> {
        Some(Self {
            dir: path.parent()?.to_path_buf(),
            name: path.file_name()?.to_os_string(),
        })
    }
}

/// Watches a fixed set of files for content changes
pub struct FileWatcher {
    paths: Vec<PathBuf>,
    keys: HashMap<FileKey, usize>,
    snapshots: Vec<Snapshot>,
    debounce: Duration,
    events: UnboundedReceiver<notify::Result<Event>>,
    // Dropping the watcher ends the event stream
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Start watching `paths`. Their current contents are the baseline; files
    /// that do not exist yet are reported once they appear.
    pub fn new(paths: Vec<PathBuf>, debounce: Duration) -> Result<Self> {
        let (tx, events) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if tx.send(res).is_err() {
                    debug!("File watcher receiver closed");
                }
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        let mut keys = HashMap::new();
        let mut dirs = BTreeSet::new();
        for (index, path) in paths.iter().enumerate() {
            match FileKey::resolve(path) {
                Some(key) => {
                    dirs.insert(key.dir.clone());
                    keys.entry(key).or_insert(index);
                }
                None => warn!("Cannot watch {}", path.display()),
            }
        }

        for dir in &dirs {
            if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
                warn!("Failed to watch {}: {}", dir.display(), e);
            }
        }

        let snapshots = paths.iter().map(|path| Snapshot::read(path)).collect();
        debug!(
            "Recorded baseline for {} files in {} directories",
            paths.len(),
            dirs.len()
        );

        Ok(Self {
            paths,
            keys,
            snapshots,
            debounce,
            events,
            _watcher: watcher,
        })
    }

    /// Wait for events that change at least one watched file and return those
    /// paths in the order they were given. Events arriving within the debounce
    /// window are batched. Returns `None` once the event stream ends.
    pub async fn next_change(&mut self) -> Option<Vec<String>> {
        loop {
            let mut touched = BTreeSet::new();
            while touched.is_empty() {
                let event = self.events.recv().await?;
                self.collect_touched(event, &mut touched);
            }

            tokio::time::sleep(self.debounce).await;
            while let Ok(event) = self.events.try_recv() {
                self.collect_touched(event, &mut touched);
            }

            let changed = self.refresh(touched).await;
            if !changed.is_empty() {
                info!("Detected changes in: {}", changed.join(", "));
                return Some(changed);
            }
            debug!("Ignoring events without content changes");
        }
    }

    /// Wait for changes until Ctrl-C, calling `on_change` with the changed paths.
    pub async fn run<F>(mut self, mut on_change: F) -> Result<()>
    where
        F: FnMut(&[String]) -> Result<()>,
    {
        info!("Watching {} files", self.paths.len());

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Stopping watcher");
                    return Ok(());
                }
                changed = self.next_change() => match changed {
                    Some(changed) => on_change(&changed)?,
                    None => {
                        warn!("File watcher event stream ended");
                        return Ok(());
                    }
                },
            }
        }
    }

    fn collect_touched(&self, event: notify::Result<Event>, touched: &mut BTreeSet<usize>) {
        match event {
            Ok(event) if !matches!(event.kind, EventKind::Access(_)) => {
                let indices = event
                    .paths
                    .iter()
                    .filter_map(|path| FileKey::from_event_path(path))
                    .filter_map(|key| self.keys.get(&key));
                touched.extend(indices);
            }
            Ok(_) => {}
            Err(e) => warn!("File watcher error: {}", e),
        }
    }

    /// Re-read the touched files off the runtime and return those whose
    /// snapshot differs from the last one.
    async fn refresh(&mut self, touched: BTreeSet<usize>) -> Vec<String> {
        let targets: Vec<(usize, PathBuf)> = touched
            .into_iter()
            .map(|index| (index, self.paths[index].clone()))
            .collect();

        let fresh = tokio::task::spawn_blocking(move || {
            targets
                .into_iter()
                .map(|(index, path)| (index, Snapshot::read(&path)))
                .collect::<Vec<_>>()
        })
        .await;

        let fresh = match fresh {
            Ok(fresh) => fresh,
            Err(e) => {
                warn!("Failed to re-read watched files: {}", e);
                return Vec::new();
            }
        };

        let mut changed = Vec::new();
        for (index, snapshot) in fresh {
            if self.snapshots[index] != snapshot {
                self.snapshots[index] = snapshot;
                changed.push(self.paths[index].to_string_lossy().into_owned());
            }
        }
        changed
    }
}
