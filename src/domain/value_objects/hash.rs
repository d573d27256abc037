//! Content digest of a combined build
//!
//! Backs the content-hash ETag strategy: identical content always yields
//! the same token, across processes and restarts.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest, rendered as lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn from_content(content: &str) -> Self {
        Self(Sha256::digest(content.as_bytes()).into())
    }

    /// Full 64-character hex digest
    pub fn hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Leading `len` hex characters, capped at the full digest
    pub fn short(&self, len: usize) -> String {
        let mut hex = self.hex();
        hex.truncate(len);
        hex
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.hex())
    }
}
