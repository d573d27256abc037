//! Error types for respack
//!
//! Uses `thiserror` for library errors. Per-source read failures are not
//! errors: they degrade to an inline marker inside the combined content.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::minifier::MinifyError;
use crate::domain::value_objects::{ContentKind, PathFormatError};

/// Result type alias for respack operations
pub type ResPackResult<T> = Result<T, ResPackError>;

/// Main error type for respack operations
#[derive(Error, Debug)]
pub enum ResPackError {
    /// A source path violates the rooted virtual path convention
    #[error(transparent)]
    PathFormat(#[from] PathFormatError),

    /// `Registry::get` was called with a key that was never registered
    #[error("no package registered under key '{key}'")]
    NotFound { key: String },

    /// URL generation was attempted before a route pattern was configured
    #[error("respack routing is not configured - set [routing] pattern or call RoutePattern::parse at startup")]
    NotConfigured,

    /// Route pattern lacks the mandatory `{key}` placeholder
    #[error("route pattern '{pattern}' must contain '{{key}}'")]
    InvalidRoutePattern { pattern: String },

    /// A package definition was given no source paths
    #[error("package '{key}' must have at least one source path")]
    EmptyPackage { key: String },

    /// A package definition was given an empty key
    #[error("package key must not be empty")]
    EmptyKey,

    /// A package key with characters that would need escaping in a URL
    #[error("package key '{key}' may only contain ASCII letters, digits, '-', '_', '.' and '~'")]
    InvalidKey { key: String },

    /// A registry factory produced a definition for a different key
    #[error("factory for key '{expected}' produced a package keyed '{actual}'")]
    KeyMismatch { expected: String, actual: String },

    /// The minifier for a content kind rejected a source
    #[error("failed to minify {kind} source {path}: {source}")]
    Minify {
        kind: ContentKind,
        path: String,
        #[source]
        source: MinifyError,
    },

    /// Registering change notifications failed
    #[error("failed to watch sources: {message}")]
    Watch { message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
