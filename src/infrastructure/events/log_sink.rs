//! Tracing Event Sink
//!
//! Forwards cache events to `tracing` so they land wherever the host
//! application's subscriber sends its logs.

use crate::domain::ports::{CacheEvent, CacheEventSink};

/// Event sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl CacheEventSink for TracingEventSink {
    fn on_event(&self, event: CacheEvent) {
        match event {
            CacheEvent::RebuildStarted { key } => {
                tracing::debug!(package = %key, "rebuild started");
            }
            CacheEvent::SourceMissing { key, path, error } => {
                tracing::warn!(package = %key, source = %path, %error, "source replaced by marker");
            }
            CacheEvent::RebuildCompleted {
                key,
                etag,
                bytes,
                missing,
            } => {
                tracing::info!(package = %key, %etag, bytes, missing, "rebuild completed");
            }
            CacheEvent::RebuildFailed { key, error } => {
                tracing::error!(package = %key, %error, "rebuild failed");
            }
            CacheEvent::Invalidated { key, path } => {
                tracing::debug!(
                    package = %key,
                    path = ?path.as_ref().map(|p| p.display().to_string()),
                    "package invalidated"
                );
            }
            CacheEvent::WatchUnavailable { key, error } => {
                tracing::warn!(package = %key, %error, "falling back to timestamp checks");
            }
        }
    }
}
