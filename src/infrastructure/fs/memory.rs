//! In-memory file source
//!
//! Deterministic stand-in for the disk: modification times come from a
//! logical clock that advances one second per write, and push
//! notifications can be switched on to exercise watcher-driven
//! invalidation without real file system events.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::time::{Duration, SystemTime};

use crate::domain::ports::{ChangeCallback, FileSource, ReadError, SourceFile, WatchHandle};
use crate::domain::value_objects::{PathFormatError, VirtualPath};
use crate::error::ResPackResult;

const MEMORY_ROOT: &str = "/memory";

struct Subscription {
    locations: Vec<PathBuf>,
    on_change: ChangeCallback,
    alive: Weak<()>,
}

/// Files held in memory, keyed by resolved location
#[derive(Default)]
pub struct MemoryFileSource {
    files: RwLock<HashMap<PathBuf, SourceFile>>,
    clock: AtomicU64,
    push: bool,
    subscriptions: Mutex<Vec<Subscription>>,
    reads: AtomicU64,
}

impl MemoryFileSource {
    /// A source without push notifications (staleness by timestamp only)
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that notifies watchers on every write and removal
    pub fn with_push() -> Self {
        Self {
            push: true,
            ..Self::default()
        }
    }

    /// Location a virtual path string resolves to
    ///
    /// # Panics
    /// If `path` is not a valid virtual path.
    pub fn location(path: &str) -> PathBuf {
        match VirtualPath::parse(path) {
            Ok(vp) => vp.to_path_under(Path::new(MEMORY_ROOT)),
            Err(e) => panic!("invalid virtual path in test fixture: {e}"),
        }
    }

    /// Create or replace a file, advancing its modification time
    pub fn write(&self, path: &str, content: impl Into<String>) {
        let location = Self::location(path);
        let modified = self.tick();
        self.files_mut().insert(
            location.clone(),
            SourceFile {
                content: content.into(),
                modified,
            },
        );
        self.notify(&location);
    }

    /// Advance a file's modification time without changing its content
    pub fn touch(&self, path: &str) {
        let location = Self::location(path);
        let modified = self.tick();
        let touched = match self.files_mut().get_mut(&location) {
            Some(file) => {
                file.modified = modified;
                true
            }
            None => false,
        };
        if touched {
            self.notify(&location);
        }
    }

    pub fn remove(&self, path: &str) {
        let location = Self::location(path);
        let removed = self.files_mut().remove(&location).is_some();
        if removed {
            self.notify(&location);
        }
    }

    /// Number of successful and failed reads so far
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of live watch subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions()
            .iter()
            .filter(|s| s.alive.strong_count() > 0)
            .count()
    }

    fn tick(&self) -> SystemTime {
        let seconds = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(seconds)
    }

    fn files_mut(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<PathBuf, SourceFile>> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscriptions(&self) -> std::sync::MutexGuard<'_, Vec<Subscription>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, location: &Path) {
        if !self.push {
            return;
        }
        let callbacks: Vec<ChangeCallback> = {
            let mut subscriptions = self.subscriptions();
            subscriptions.retain(|s| s.alive.strong_count() > 0);
            subscriptions
                .iter()
                .filter(|s| s.locations.iter().any(|l| l == location))
                .map(|s| Arc::clone(&s.on_change))
                .collect()
        };
        for callback in callbacks {
            callback(location);
        }
    }
}

impl FileSource for MemoryFileSource {
    fn resolve(&self, path: &VirtualPath) -> Result<PathBuf, PathFormatError> {
        Ok(path.to_path_under(Path::new(MEMORY_ROOT)))
    }

    fn read(&self, location: &Path) -> Result<SourceFile, ReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .cloned()
            .ok_or_else(|| ReadError::NotFound(location.to_path_buf()))
    }

    fn modified(&self, location: &Path) -> Option<SystemTime> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .map(|f| f.modified)
    }

    fn watch(
        &self,
        locations: &[PathBuf],
        on_change: ChangeCallback,
    ) -> ResPackResult<Option<WatchHandle>> {
        if !self.push {
            return Ok(None);
        }
        let token = Arc::new(());
        self.subscriptions().push(Subscription {
            locations: locations.to_vec(),
            on_change,
            alive: Arc::downgrade(&token),
        });
        Ok(Some(WatchHandle::new(token)))
    }
}

impl std::fmt::Debug for MemoryFileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFileSource")
            .field("push", &self.push)
            .field("reads", &self.read_count())
            .finish_non_exhaustive()
    }
}
