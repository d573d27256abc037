//! Package definition - what a package combines
//!
//! Immutable once constructed. Construction validates every source path, so
//! a definition that exists is one whose paths are all rooted.

use crate::domain::value_objects::{ContentKind, VirtualPath};
use crate::error::{ResPackError, ResPackResult};

/// A named, ordered list of sources treated as one build unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDefinition {
    /// Registry key; also part of generated URLs
    key: String,
    /// Concatenation order is significant
    sources: Vec<VirtualPath>,
    minify: bool,
    kind: ContentKind,
}

impl PackageDefinition {
    /// Create a definition, validating the key and every source path
    ///
    /// # Errors
    /// - `EmptyKey` if `key` is empty
    /// - `InvalidKey` if `key` has characters outside the URL-unreserved set
    /// - `EmptyPackage` if `sources` is empty
    /// - `PathFormat` for the first source that is not a rooted virtual path
    pub fn new<I, S>(
        key: impl Into<String>,
        kind: ContentKind,
        minify: bool,
        sources: I,
    ) -> ResPackResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = key.into();
        if key.is_empty() {
            return Err(ResPackError::EmptyKey);
        }
        // Keys are inserted into URLs verbatim
        if !key.bytes().all(is_unreserved) {
            return Err(ResPackError::InvalidKey { key });
        }

        let sources = sources
            .into_iter()
            .map(|s| VirtualPath::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if sources.is_empty() {
            return Err(ResPackError::EmptyPackage { key });
        }

        Ok(Self {
            key,
            sources,
            minify,
            kind,
        })
    }

    /// Shorthand for a script package
    pub fn script<I, S>(key: impl Into<String>, minify: bool, sources: I) -> ResPackResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(key, ContentKind::Script, minify, sources)
    }

    /// Shorthand for a stylesheet package
    pub fn stylesheet<I, S>(
        key: impl Into<String>,
        minify: bool,
        sources: I,
    ) -> ResPackResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(key, ContentKind::Stylesheet, minify, sources)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn sources(&self) -> &[VirtualPath] {
        &self.sources
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }
}

/// RFC 3986 unreserved characters
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}
