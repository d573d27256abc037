//! Application Layer
//!
//! Services that orchestrate the domain through its ports.
//!
//! ## Services
//!
//! - `Registry` - keyed store, at most one package per key
//! - `PackageCache` - rebuild, memoize and invalidate package builds

pub mod cache;
pub mod registry;

pub use cache::{missing_source_marker, CacheOptions, PackageCache, SOURCE_SEPARATOR};
pub use registry::Registry;
