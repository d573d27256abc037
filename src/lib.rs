//! respack - script and stylesheet package cache
//!
//! respack combines ordered lists of source files into packages, optionally
//! minifies them, memoizes the result and versions every build with an
//! ETag. Builds are invalidated by file system notifications or, where
//! those are unavailable, by comparing source modification times.
//!
//! ```no_run
//! use std::sync::Arc;
//! use respack::{LocalFileSource, PackageCache, Registry};
//!
//! let registry = Registry::new();
//! let cache = PackageCache::new(Arc::new(LocalFileSource::new("public")));
//! let package = registry
//!     .load_script("site-js", true, ["~/js/lib.js", "~/js/app.js"])
//!     .unwrap();
//! let etag = cache.etag(&package, false).unwrap();
//! let content = cache.content(&package).unwrap();
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod serve;

// Re-exports for convenience
pub use application::{CacheOptions, PackageCache, Registry};
pub use config::{Config, ConfigWarning};
pub use domain::entities::{CachedBuild, Package, PackageDefinition};
pub use domain::ports::{CacheEvent, CacheEventSink, FileSource, Minifier, MinifierSet};
pub use domain::value_objects::{ContentKind, ETag, EtagStrategy, PathFormatError, VirtualPath};
pub use error::{ResPackError, ResPackResult};
pub use infrastructure::{
    CommandMinifier, JsonEventSink, LocalFileSource, MemoryFileSource, TracingEventSink,
};
pub use presentation::{create_runtime, Runtime};
pub use serve::{respond, PackageRequest, PackageResponse, ResponseOptions, RoutePattern, Router};
