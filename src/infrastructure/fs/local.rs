//! Local File Source Implementation
//!
//! Implements the FileSource port for files below a root directory, with
//! `notify`-based change notification.

use std::collections::{BTreeSet, HashSet};
use std::fs::{self, Metadata};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{ChangeCallback, FileSource, ReadError, SourceFile, WatchHandle};
use crate::domain::value_objects::{PathFormatError, VirtualPath};
use crate::error::{ResPackError, ResPackResult};

/// Sources read from disk below `root`
///
/// `~/js/app.js` and `/js/app.js` both resolve to `<root>/js/app.js`.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    root: PathBuf,
    watch: bool,
}

impl LocalFileSource {
    /// Create a source rooted at `root` with change notification enabled
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        // Canonicalize so notify events match resolved locations
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        Self { root, watch: true }
    }

    /// Builder: enable or disable push notifications
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Write `content` to `path` via a temporary sibling and a rename.
///
/// Readers of `path` see either the old file or the complete new one.
pub fn write_atomic(path: &Path, content: &[u8]) -> ResPackResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn modified_time(metadata: &Metadata) -> SystemTime {
    metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH)
}

impl FileSource for LocalFileSource {
    fn resolve(&self, path: &VirtualPath) -> Result<PathBuf, PathFormatError> {
        Ok(path.to_path_under(&self.root))
    }

    fn read(&self, location: &Path) -> Result<SourceFile, ReadError> {
        let metadata = fs::metadata(location).map_err(|e| ReadError::from_io(location, e))?;
        if !metadata.is_file() {
            return Err(ReadError::NotFound(location.to_path_buf()));
        }
        let content = fs::read_to_string(location).map_err(|e| ReadError::from_io(location, e))?;
        Ok(SourceFile {
            content,
            modified: modified_time(&metadata),
        })
    }

    fn modified(&self, location: &Path) -> Option<SystemTime> {
        fs::metadata(location)
            .ok()
            .filter(Metadata::is_file)
            .map(|m| modified_time(&m))
    }

    fn watch(
        &self,
        locations: &[PathBuf],
        on_change: ChangeCallback,
    ) -> ResPackResult<Option<WatchHandle>> {
        if !self.watch {
            return Ok(None);
        }

        let watched: HashSet<PathBuf> = locations.iter().cloned().collect();
        // Watch parents, not files: a deleted and recreated file keeps
        // reporting through its directory.
        let directories: BTreeSet<PathBuf> = locations
            .iter()
            .filter_map(|l| l.parent().map(Path::to_path_buf))
            .collect();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let Ok(event) = res else {
                    return;
                };
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                for path in &event.paths {
                    if watched.contains(path) {
                        on_change(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| ResPackError::Watch {
            message: e.to_string(),
        })?;

        for directory in &directories {
            watcher
                .watch(directory, RecursiveMode::NonRecursive)
                .map_err(|e| ResPackError::Watch {
                    message: format!("{}: {}", directory.display(), e),
                })?;
        }

        tracing::debug!(
            directories = directories.len(),
            files = locations.len(),
            "watching package sources"
        );
        Ok(Some(WatchHandle::new(Mutex::new(watcher))))
    }
}
