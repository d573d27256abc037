//! Conditional package responses
//!
//! Framework-neutral: a request carries the two headers that matter and
//! the response is a status, a header list and a body for the host server
//! to copy over.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::compression::Encoding;
use crate::application::{PackageCache, Registry};
use crate::domain::value_objects::ETag;
use crate::error::ResPackResult;

/// One year
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Request headers relevant to serving a package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRequest {
    pub if_none_match: Option<String>,
    pub accept_encoding: Option<String>,
}

impl PackageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn if_none_match(mut self, value: impl Into<String>) -> Self {
        self.if_none_match = Some(value.into());
        self
    }

    pub fn accept_encoding(mut self, value: impl Into<String>) -> Self {
        self.accept_encoding = Some(value.into());
        self
    }
}

/// What `respond` adds on top of content and MIME type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseOptions {
    pub cache_headers: bool,
    pub compression: bool,
    pub max_age: Duration,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            cache_headers: true,
            compression: true,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl PackageResponse {
    /// First value of header `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_not_modified(&self) -> bool {
        self.status == 304
    }
}

/// Serve package `key`.
///
/// The ETag is taken with a freshness check; when `If-None-Match` names
/// it the response is a bodiless 304.
///
/// # Errors
/// `NotFound` for an unregistered key, and any rebuild error.
pub fn respond(
    registry: &Registry,
    cache: &PackageCache,
    key: &str,
    request: &PackageRequest,
    options: &ResponseOptions,
) -> ResPackResult<PackageResponse> {
    let package = registry.get(key)?;
    let build = cache.build(&package, true)?;
    let etag = build.etag();

    if let Some(header) = request.if_none_match.as_deref() {
        if etag.matches_header(header) {
            tracing::debug!(package = %key, etag = %etag, "not modified");
            return Ok(PackageResponse {
                status: 304,
                headers: vec![("ETag".to_string(), etag.quoted())],
                body: Vec::new(),
            });
        }
    }

    let mut headers = vec![(
        "Content-Type".to_string(),
        package.mime_type().to_string(),
    )];
    if options.cache_headers {
        headers.extend(cache_headers(etag, options.max_age, Utc::now()));
    }

    let encoding = if options.compression {
        Encoding::negotiate(request.accept_encoding.as_deref())
    } else {
        Encoding::Identity
    };
    let body = encoding.compress(build.content().as_bytes())?;
    if let Some(value) = encoding.header_value() {
        headers.push(("Content-Encoding".to_string(), value.to_string()));
        if !options.cache_headers {
            headers.push(("Vary".to_string(), "Accept-Encoding".to_string()));
        }
    }

    Ok(PackageResponse {
        status: 200,
        headers,
        body,
    })
}

/// Long-lived public caching headers for a versioned URL
pub fn cache_headers(etag: &ETag, max_age: Duration, now: DateTime<Utc>) -> Vec<(String, String)> {
    let expires = chrono::Duration::from_std(max_age)
        .ok()
        .and_then(|age| now.checked_add_signed(age))
        .unwrap_or(now);
    vec![
        (
            "Cache-Control".to_string(),
            format!("public, max-age={}", max_age.as_secs()),
        ),
        ("Expires".to_string(), expires.format(HTTP_DATE).to_string()),
        ("Last-Modified".to_string(), now.format(HTTP_DATE).to_string()),
        ("ETag".to_string(), etag.quoted()),
        ("Vary".to_string(), "Accept-Encoding".to_string()),
    ]
}
