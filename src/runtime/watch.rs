//! File watching for `--watch` mode
//!
//! Uses the `notify` crate with debouncing to detect edits to the files being
//! highlighted. Events arrive over an mpsc channel and are drained on the
//! runtime's thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};

/// Coalesces bursts of writes from editors that save in several steps
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches a fixed set of files.
///
/// The parent directories are watched rather than the files themselves.
/// Editors that save by writing a temp file and renaming it over the
/// original replace the inode, and a watch on the old inode goes quiet.
pub struct FileWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<Result<Vec<DebouncedEvent>, notify::Error>>,
    files: Vec<PathBuf>,
}

impl FileWatcher {
    pub fn new(files: &[PathBuf]) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer =
            new_debouncer(WATCH_DEBOUNCE, tx).context("creating file watcher")?;

        let mut watched = Vec::with_capacity(files.len());
        let mut dirs: Vec<PathBuf> = Vec::new();
        for file in files {
            let file = file
                .canonicalize()
                .with_context(|| format!("resolving {}", file.display()))?;
            let dir = file
                .parent()
                .with_context(|| format!("{} has no parent directory", file.display()))?
                .to_path_buf();
            if !dirs.contains(&dir) {
                debouncer
                    .watcher()
                    .watch(&dir, notify::RecursiveMode::NonRecursive)
                    .with_context(|| format!("watching {}", dir.display()))?;
                tracing::debug!("Watching directory {}", dir.display());
                dirs.push(dir);
            }
            tracing::info!("Watching {}", file.display());
            watched.push(file);
        }

        Ok(Self {
            _debouncer: debouncer,
            rx,
            files: watched,
        })
    }

    /// Canonical paths being watched, in the order given
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Index into [`FileWatcher::files`] of a watched path
    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.files.iter().position(|f| f == path)
    }

    /// Map an event path onto the watched file it names, if any. Sibling
    /// files in a watched directory map to `None`.
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        if let Some(i) = self.index_of(path) {
            return Some(self.files[i].clone());
        }
        let canonical = path.canonicalize().ok()?;
        self.index_of(&canonical).map(|i| self.files[i].clone())
    }

    /// Drain pending events without blocking. Returns each changed watched
    /// file once.
    pub fn poll_changes(&self) -> Vec<PathBuf> {
        let mut changed: Vec<PathBuf> = Vec::new();

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    for event in events {
                        if event.kind == DebouncedEventKind::AnyContinuous {
                            continue;
                        }
                        if let Some(path) = self.resolve(&event.path) {
                            if !changed.contains(&path) {
                                changed.push(path);
                            }
                        }
                    }
                }
                Err(e) => tracing::warn!("File watcher error: {:?}", e),
            }
        }

        if !changed.is_empty() {
            tracing::debug!("File watcher detected {} changes", changed.len());
        }
        changed
    }
}
