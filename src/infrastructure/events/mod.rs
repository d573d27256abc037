//! Event Sink Implementations
//!
//! Provides concrete implementations of CacheEventSink:
//! - TracingEventSink: log records through `tracing`
//! - JsonEventSink: NDJSON output for automation

mod json;
mod log_sink;

pub use log_sink::TracingEventSink;
pub use json::{event_to_json, JsonEventSink};
