//! Virtual Path Value Object
//!
//! A source identifier in the rooted, application-relative convention:
//! - `~/js/app.js` or `/js/app.js`
//! - No traversal (`..`) and no empty or `.` segments
//! - Forward slashes only

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Why a path was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFormatReason {
    /// Path is empty
    Empty,
    /// Path does not start with `~/` or `/`
    NotRooted,
    /// Path names the root itself, not a file below it
    RootOnly,
    /// Path contains traversal components (..)
    Traversal,
    /// Path contains an empty or `.` segment
    InvalidSegment,
    /// Path contains a backslash or NUL byte
    InvalidCharacter,
}

impl fmt::Display for PathFormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PathFormatReason::Empty => "path is empty",
            PathFormatReason::NotRooted => "path is not rooted",
            PathFormatReason::RootOnly => "path names no file",
            PathFormatReason::Traversal => "path contains '..'",
            PathFormatReason::InvalidSegment => "path contains an empty or '.' segment",
            PathFormatReason::InvalidCharacter => "path contains '\\' or NUL",
        };
        f.write_str(reason)
    }
}

/// A source path that violates the rooted virtual path convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFormatError {
    path: String,
    reason: PathFormatReason,
}

impl PathFormatError {
    /// Create an error for a path that is not rooted
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_reason(path, PathFormatReason::NotRooted)
    }

    pub fn with_reason(path: impl Into<String>, reason: PathFormatReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }

    /// The offending path as given
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn reason(&self) -> PathFormatReason {
        self.reason
    }
}

impl fmt::Display for PathFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "script and stylesheet paths must be rooted virtual paths prefixed with '~/' or '/' ({}) [{}]",
            self.reason, self.path
        )
    }
}

impl std::error::Error for PathFormatError {}

/// A validated rooted virtual path
///
/// Keeps the path exactly as written (for markers and diagnostics) plus the
/// root-relative remainder used for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualPath {
    raw: String,
    relative_start: usize,
}

impl VirtualPath {
    /// Validate and wrap a rooted virtual path
    pub fn parse(path: &str) -> Result<Self, PathFormatError> {
        let fail = |reason| Err(PathFormatError::with_reason(path, reason));

        if path.is_empty() {
            return fail(PathFormatReason::Empty);
        }

        if path.contains(['\\', '\0']) {
            return fail(PathFormatReason::InvalidCharacter);
        }

        let relative_start = if path.starts_with("~/") {
            2
        } else if path.starts_with('/') {
            1
        } else if path == "~" {
            return fail(PathFormatReason::RootOnly);
        } else {
            return fail(PathFormatReason::NotRooted);
        };

        let relative = &path[relative_start..];
        if relative.is_empty() {
            return fail(PathFormatReason::RootOnly);
        }

        for segment in relative.split('/') {
            match segment {
                ".." => return fail(PathFormatReason::Traversal),
                "" | "." => return fail(PathFormatReason::InvalidSegment),
                _ => {}
            }
        }

        Ok(Self {
            raw: path.to_string(),
            relative_start,
        })
    }

    /// The path as written in the package definition
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The root-relative remainder, e.g. `js/app.js` for `~/js/app.js`
    pub fn relative(&self) -> &str {
        &self.raw[self.relative_start..]
    }

    /// Segments of the root-relative remainder
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.relative().split('/')
    }

    /// Map onto a physical directory, one path component per segment
    pub fn to_path_under(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for VirtualPath {
    type Err = PathFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for VirtualPath {
    type Error = PathFormatError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
