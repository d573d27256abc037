//! Serving helpers
//!
//! URL and tag generation for pages that reference packages, and
//! conditional responses for the endpoint that delivers them.

pub mod compression;
pub mod response;
pub mod routing;

pub use compression::Encoding;
pub use response::{
    cache_headers, respond, PackageRequest, PackageResponse, ResponseOptions, DEFAULT_MAX_AGE,
};
pub use routing::{script_tag, stylesheet_tag, RoutePattern, Router};
