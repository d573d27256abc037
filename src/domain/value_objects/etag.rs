//! ETag value object and derivation strategies
//!
//! Tokens are 16 lowercase hex characters: safe in URLs, paths and headers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hash::ContentHash;

/// Length of every generated token
pub const ETAG_LEN: usize = 16;

/// How a build's version token is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EtagStrategy {
    /// Nanosecond build timestamp. Changes on every rebuild, even when the
    /// rebuilt content is identical.
    #[default]
    BuildTime,
    /// Truncated SHA-256 of the combined content. Changes iff content does.
    ContentHash,
}

impl FromStr for EtagStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "build-time" | "buildtime" | "time" => Ok(EtagStrategy::BuildTime),
            "content-hash" | "contenthash" | "hash" => Ok(EtagStrategy::ContentHash),
            other => Err(format!(
                "unknown etag strategy '{}' (expected 'build-time' or 'content-hash')",
                other
            )),
        }
    }
}

/// Version token of a cached build
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ETag(String);

impl ETag {
    /// Derive from the build timestamp's nanoseconds since the Unix epoch
    pub fn from_build_time(built_at: DateTime<Utc>) -> Self {
        let nanos = built_at.timestamp_nanos_opt().unwrap_or_default();
        Self(format!("{:016x}", nanos as u64))
    }

    /// Derive from the combined content
    pub fn from_content(content: &str) -> Self {
        Self(ContentHash::from_content(content).short(ETAG_LEN))
    }

    pub fn derive(strategy: EtagStrategy, built_at: DateTime<Utc>, content: &str) -> Self {
        match strategy {
            EtagStrategy::BuildTime => Self::from_build_time(built_at),
            EtagStrategy::ContentHash => Self::from_content(content),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header form: `"<token>"`
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    /// Whether an `If-None-Match` header value names this token.
    ///
    /// Accepts bare or quoted tokens, weak validators, comma lists and `*`.
    pub fn matches_header(&self, header: &str) -> bool {
        header.split(',').map(str::trim).any(|candidate| {
            if candidate == "*" {
                return true;
            }
            let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
            let candidate = candidate
                .strip_prefix('"')
                .and_then(|c| c.strip_suffix('"'))
                .unwrap_or(candidate);
            candidate == self.0
        })
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ETag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
