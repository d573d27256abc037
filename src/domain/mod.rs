//! Domain Layer
//!
//! Package definitions, cached builds and the ports the cache talks through.
//!
//! ## Structure
//!
//! - `entities/` - PackageDefinition, CachedBuild, Package
//! - `value_objects/` - VirtualPath, ContentKind, ETag, ContentHash
//! - `ports/` - FileSource, Minifier, CacheEventSink
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;
