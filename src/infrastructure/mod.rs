//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File sources (Local, Memory)
//! - `minify/` - Minifiers backed by external compressors
//! - `events/` - Cache event sinks (tracing, NDJSON)

pub mod events;
pub mod fs;
pub mod minify;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::{write_atomic, LocalFileSource, MemoryFileSource};
pub use minify::CommandMinifier;
