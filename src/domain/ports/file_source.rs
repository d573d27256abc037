//! FileSource port - where package sources come from
//!
//! Resolves rooted virtual paths to physical locations, reads them, and
//! optionally pushes change notifications so cached builds can be
//! invalidated without polling.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;

use crate::domain::value_objects::{PathFormatError, VirtualPath};
use crate::error::ResPackResult;

/// Content of one source plus its modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub content: String,
    pub modified: SystemTime,
}

/// Why a resolved source could not be read
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
            _ => ReadError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Invoked with the changed location whenever a watched source changes
pub type ChangeCallback = Arc<dyn Fn(&Path) + Send + Sync>;

/// Keeps a change subscription alive; dropping it stops notifications
pub struct WatchHandle {
    _guard: Box<dyn Any + Send + Sync>,
}

impl WatchHandle {
    pub fn new<G: Any + Send + Sync>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchHandle").finish_non_exhaustive()
    }
}

/// Abstract source of package files
///
/// Implementations:
/// - `LocalFileSource` - files below a root directory, `notify` watching
/// - `MemoryFileSource` - in-memory, for tests and embedding
pub trait FileSource: Send + Sync {
    /// Map a virtual path to the location it is read from
    fn resolve(&self, path: &VirtualPath) -> Result<PathBuf, PathFormatError>;

    /// Read a resolved location
    fn read(&self, location: &Path) -> Result<SourceFile, ReadError>;

    /// Current modification time, `None` when the location is unreadable
    fn modified(&self, location: &Path) -> Option<SystemTime>;

    /// Subscribe to changes of `locations`.
    ///
    /// `Ok(None)` means the source cannot push notifications and callers
    /// must compare modification times instead.
    fn watch(
        &self,
        _locations: &[PathBuf],
        _on_change: ChangeCallback,
    ) -> ResPackResult<Option<WatchHandle>> {
        Ok(None)
    }
}

impl<T: FileSource + ?Sized> FileSource for Arc<T> {
    fn resolve(&self, path: &VirtualPath) -> Result<PathBuf, PathFormatError> {
        (**self).resolve(path)
    }

    fn read(&self, location: &Path) -> Result<SourceFile, ReadError> {
        (**self).read(location)
    }

    fn modified(&self, location: &Path) -> Option<SystemTime> {
        (**self).modified(location)
    }

    fn watch(
        &self,
        locations: &[PathBuf],
        on_change: ChangeCallback,
    ) -> ResPackResult<Option<WatchHandle>> {
        (**self).watch(locations, on_change)
    }
}
