//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod cache_events;
pub mod file_source;
pub mod minifier;

pub use cache_events::{CacheEvent, CacheEventSink, NoopEventSink};
pub use file_source::{ChangeCallback, FileSource, ReadError, SourceFile, WatchHandle};
pub use minifier::{Minifier, MinifierSet, MinifyError, Passthrough};
