//! Response compression
//!
//! Negotiation is a case-insensitive substring match on `Accept-Encoding`:
//! gzip wins over deflate, anything else is sent as is. Quality values are
//! not interpreted.

use std::io::{self, Write};

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;

/// Content coding applied to a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
    /// zlib-wrapped deflate, as HTTP defines `deflate`
    Deflate,
    Identity,
}

impl Encoding {
    /// Pick the coding for an `Accept-Encoding` header value
    pub fn negotiate(accept_encoding: Option<&str>) -> Self {
        let Some(header) = accept_encoding else {
            return Encoding::Identity;
        };
        let header = header.to_ascii_lowercase();
        if header.contains("gzip") {
            Encoding::Gzip
        } else if header.contains("deflate") {
            Encoding::Deflate
        } else {
            Encoding::Identity
        }
    }

    /// `Content-Encoding` value, `None` for identity
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            Encoding::Gzip => Some("gzip"),
            Encoding::Deflate => Some("deflate"),
            Encoding::Identity => None,
        }
    }

    pub fn compress(&self, body: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Encoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(body)?;
                encoder.finish()
            }
            Encoding::Deflate => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(body)?;
                encoder.finish()
            }
            Encoding::Identity => Ok(body.to_vec()),
        }
    }
}
