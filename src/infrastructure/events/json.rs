//! JSON Event Sink
//!
//! Outputs cache events as NDJSON for automation consumption.

use crate::domain::ports::{CacheEvent, CacheEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of a cache event
pub fn event_to_json(event: &CacheEvent) -> serde_json::Value {
    match event {
        CacheEvent::RebuildStarted { key } => serde_json::json!({
            "event": "rebuild_started",
            "package": key,
        }),

        CacheEvent::SourceMissing { key, path, error } => serde_json::json!({
            "event": "source_missing",
            "package": key,
            "path": path,
            "error": error,
        }),

        CacheEvent::RebuildCompleted {
            key,
            etag,
            bytes,
            missing,
        } => {
            let status = if *missing == 0 { "success" } else { "partial" };
            serde_json::json!({
                "event": "rebuild_completed",
                "package": key,
                "status": status,
                "etag": etag,
                "bytes": bytes,
                "missing": missing,
            })
        }

        CacheEvent::RebuildFailed { key, error } => serde_json::json!({
            "event": "rebuild_failed",
            "package": key,
            "error": error,
        }),

        CacheEvent::Invalidated { key, path } => serde_json::json!({
            "event": "invalidated",
            "package": key,
            "path": path.as_ref().map(|p| p.display().to_string()),
        }),

        CacheEvent::WatchUnavailable { key, error } => serde_json::json!({
            "event": "watch_unavailable",
            "package": key,
            "error": error,
        }),
    }
}

impl CacheEventSink for JsonEventSink {
    fn on_event(&self, event: CacheEvent) {
        self.write_event(event_to_json(&event));
    }
}
