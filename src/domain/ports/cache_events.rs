//! Cache Event Port
//!
//! Observable interface for rebuilds and invalidations. Missing sources are
//! absorbed into the combined content; this is where they get reported.

use std::path::PathBuf;

/// Event emitted by the package cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A rebuild acquired the package lock and started reading sources
    RebuildStarted { key: String },

    /// A source could not be read and was replaced by the inline marker
    SourceMissing {
        key: String,
        path: String,
        error: String,
    },

    /// A new build was installed
    RebuildCompleted {
        key: String,
        etag: String,
        bytes: usize,
        missing: usize,
    },

    /// A rebuild aborted; the previous build (if any) stays installed
    RebuildFailed { key: String, error: String },

    /// A watched source changed or the package was invalidated explicitly
    Invalidated { key: String, path: Option<PathBuf> },

    /// Push invalidation could not be set up; staleness falls back to
    /// modification time checks
    WatchUnavailable { key: String, error: String },
}

impl CacheEvent {
    /// Key of the package the event concerns
    pub fn key(&self) -> &str {
        match self {
            CacheEvent::RebuildStarted { key }
            | CacheEvent::SourceMissing { key, .. }
            | CacheEvent::RebuildCompleted { key, .. }
            | CacheEvent::RebuildFailed { key, .. }
            | CacheEvent::Invalidated { key, .. }
            | CacheEvent::WatchUnavailable { key, .. } => key,
        }
    }
}

/// Trait for receiving cache events
///
/// Implementations:
/// - `TracingEventSink`: forwards to `tracing`
/// - `JsonEventSink`: NDJSON event stream
/// - `NoopEventSink`: silent operation
pub trait CacheEventSink: Send + Sync {
    fn on_event(&self, event: CacheEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl CacheEventSink for NoopEventSink {
    fn on_event(&self, _event: CacheEvent) {}
}
