//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `PackageDefinition` - key, ordered sources, minify flag, kind
//! - `CachedBuild` - one combined build of a package
//! - `Package` - a definition plus its replaceable build slot

mod build;
mod definition;
mod package;

pub use build::{CachedBuild, SourceSignature, SourceStamp};
pub use definition::PackageDefinition;
pub use package::Package;
pub(crate) use package::WatchState;
