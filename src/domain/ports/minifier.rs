//! Minifier port
//!
//! One minifier per content kind. The cache never interprets minifier
//! output; a failure aborts the rebuild that asked for it.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::value_objects::ContentKind;

/// Minifier failure
#[derive(Debug, Error)]
pub enum MinifyError {
    /// The external compressor could not be started or talked to
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external compressor exited unsuccessfully
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The compressor produced bytes that are not UTF-8
    #[error("'{program}' produced non UTF-8 output")]
    InvalidOutput { program: String },

    /// Rejected by an in-process minifier
    #[error("{0}")]
    Rejected(String),
}

/// Transforms raw content into a minified equivalent
pub trait Minifier: Send + Sync {
    fn minify(&self, content: &str) -> Result<String, MinifyError>;
}

impl<F> Minifier for F
where
    F: Fn(&str) -> Result<String, MinifyError> + Send + Sync,
{
    fn minify(&self, content: &str) -> Result<String, MinifyError> {
        self(content)
    }
}

/// Identity minifier, used for kinds with nothing configured
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Minifier for Passthrough {
    fn minify(&self, content: &str) -> Result<String, MinifyError> {
        Ok(content.to_string())
    }
}

/// Minifier lookup by content kind
#[derive(Clone, Default)]
pub struct MinifierSet {
    by_kind: HashMap<ContentKind, Arc<dyn Minifier>>,
}

impl MinifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the minifier for `kind`, replacing any previous one
    pub fn with(mut self, kind: ContentKind, minifier: impl Minifier + 'static) -> Self {
        self.by_kind.insert(kind, Arc::new(minifier));
        self
    }

    pub fn insert(&mut self, kind: ContentKind, minifier: Arc<dyn Minifier>) {
        self.by_kind.insert(kind, minifier);
    }

    /// Minifier for `kind`, falling back to [`Passthrough`]
    pub fn get(&self, kind: ContentKind) -> &dyn Minifier {
        match self.by_kind.get(&kind) {
            Some(minifier) => minifier.as_ref(),
            None => &Passthrough,
        }
    }

    pub fn contains(&self, kind: ContentKind) -> bool {
        self.by_kind.contains_key(&kind)
    }
}

impl std::fmt::Debug for MinifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.by_kind.keys().map(ContentKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("MinifierSet").field("kinds", &kinds).finish()
    }
}
