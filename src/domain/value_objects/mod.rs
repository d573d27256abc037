//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod content_kind;
mod etag;
mod hash;
mod virtual_path;

pub use config_warning::ConfigWarning;
pub use content_kind::ContentKind;
pub use etag::{ETag, EtagStrategy, ETAG_LEN};
pub use hash::ContentHash;
pub use virtual_path::{PathFormatError, PathFormatReason, VirtualPath};
