//! Cached build - the memoized output of combining a package's sources

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ETag, VirtualPath};

/// One source as observed by the build that read it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStamp {
    pub path: VirtualPath,
    /// Resolved location, also the watch target
    pub location: PathBuf,
    /// `None` when the read failed
    pub modified: Option<SystemTime>,
}

/// Staleness signature: every source location and the timestamp read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSignature {
    stamps: Vec<SourceStamp>,
}

impl SourceSignature {
    pub fn new(stamps: Vec<SourceStamp>) -> Self {
        Self { stamps }
    }

    pub fn stamps(&self) -> &[SourceStamp] {
        &self.stamps
    }

    /// Locations to watch, in source order
    pub fn locations(&self) -> Vec<PathBuf> {
        self.stamps.iter().map(|s| s.location.clone()).collect()
    }

    /// Newest modification time among sources that were read
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.stamps.iter().filter_map(|s| s.modified).max()
    }

    /// Whether any source's current time differs from the recorded one.
    ///
    /// A source that appeared or disappeared counts as changed.
    pub fn is_outdated(&self, mut current: impl FnMut(&std::path::Path) -> Option<SystemTime>) -> bool {
        self.stamps
            .iter()
            .any(|stamp| current(&stamp.location) != stamp.modified)
    }
}

/// A fully combined package build. Replaced, never mutated.
#[derive(Debug)]
pub struct CachedBuild {
    content: Arc<str>,
    built_at: DateTime<Utc>,
    etag: ETag,
    signature: SourceSignature,
    /// Invalidation epoch observed when the rebuild started
    epoch: u64,
    missing: Vec<VirtualPath>,
}

impl CachedBuild {
    pub fn new(
        content: impl Into<Arc<str>>,
        built_at: DateTime<Utc>,
        etag: ETag,
        signature: SourceSignature,
        epoch: u64,
        missing: Vec<VirtualPath>,
    ) -> Self {
        Self {
            content: content.into(),
            built_at,
            etag,
            signature,
            epoch,
            missing,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Shared handle to the content, cheap to clone
    pub fn content_arc(&self) -> Arc<str> {
        Arc::clone(&self.content)
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn etag(&self) -> &ETag {
        &self.etag
    }

    pub fn signature(&self) -> &SourceSignature {
        &self.signature
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Sources that were replaced by the missing-source marker
    pub fn missing(&self) -> &[VirtualPath] {
        &self.missing
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
