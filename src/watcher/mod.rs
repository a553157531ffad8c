//! File watching for live reload.
//!
//! Uses notify for cross-platform file system events. The parent
//! directory is watched so editors that save by renaming a temp file over
//! the target are still seen.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Delay between the last change event and the reload.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Quiet period tracker: a change is ready once no new event has
/// arrived for `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settle {
    delay: Duration,
    last_event: Option<Instant>,
}

impl Settle {
    const fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_event: None,
        }
    }

    const fn touch(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    fn take_ready(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(at) if now.saturating_duration_since(at) >= self.delay => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }
}

/// Watches a single JSON file and reports debounced changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    dir: PathBuf,
    file: PathBuf,
    file_name: Option<OsString>,
    settle: Settle,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("file", &self.file)
            .field("settle", &self.settle)
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Fails if the platform watcher cannot be created or the containing
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        let given = path.as_ref();
        // Event paths from the OS are absolute and canonical.
        let file = std::fs::canonicalize(given).unwrap_or_else(|_| given.to_path_buf());
        let file_name = file.file_name().map(ToOwned::to_owned);
        let dir = watch_root_for(&file);

        let (tx, events) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone once the viewer drops this watcher.
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(file = %file.display(), dir = %dir.display(), "watching");

        Ok(Self {
            _watcher: watcher,
            events,
            dir,
            file,
            file_name,
            settle: Settle::new(debounce),
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.file
    }

    /// Drain pending events; true once a change has settled.
    pub fn take_change_ready(&mut self) -> bool {
        let (mut hits, mut misses) = (0u32, 0u32);
        for result in self.events.try_iter() {
            match result {
                Ok(event) if event.paths.iter().any(|p| self.concerns(p)) => hits += 1,
                Ok(event) => {
                    misses += 1;
                    tracing::trace!(kind = ?event.kind, paths = ?event.paths, "unrelated fs event");
                }
                Err(err) => tracing::warn!(%err, "file watcher error"),
            }
        }
        if hits + misses > 0 {
            tracing::debug!(hits, misses, "file watcher poll");
        }

        let now = Instant::now();
        if hits > 0 {
            self.settle.touch(now);
        }
        self.settle.take_ready(now)
    }

    /// Whether an event on `path` may have changed the watched file.
    fn concerns(&self, path: &Path) -> bool {
        path == self.dir
            || path == self.file
            || path.file_name().is_some_and(|name| self.file_name.as_deref() == Some(name))
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
