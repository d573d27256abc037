//! URL generation for package endpoints

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::application::PackageCache;
use crate::domain::entities::Package;
use crate::domain::value_objects::{ContentKind, ETag};
use crate::error::{ResPackError, ResPackResult};

const KEY_PARAM: &str = "{key}";
const ETAG_PARAM: &str = "{etag}";

/// Parsed route pattern such as `content/{etag}/{key}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    /// Pattern without its leading `~/` or `/`
    template: String,
    etag_in_path: bool,
}

impl RoutePattern {
    /// Parse a pattern; it must contain `{key}`.
    ///
    /// Without `{etag}` the token is appended as `?etag=<token>`.
    pub fn parse(pattern: &str) -> ResPackResult<Self> {
        if !pattern.contains(KEY_PARAM) {
            return Err(ResPackError::InvalidRoutePattern {
                pattern: pattern.to_string(),
            });
        }
        let template = pattern
            .strip_prefix("~/")
            .or_else(|| pattern.strip_prefix('/'))
            .unwrap_or(pattern);
        Ok(Self {
            template: template.to_string(),
            etag_in_path: template.contains(ETAG_PARAM),
        })
    }

    pub fn etag_in_path(&self) -> bool {
        self.etag_in_path
    }

    /// Rooted URL for `key` at version `etag`
    ///
    /// `key` is inserted verbatim. Package keys are limited to URL-unreserved
    /// characters when the definition is built, so no escaping is needed.
    pub fn url(&self, key: &str, etag: &ETag) -> String {
        let path = self.template.replace(KEY_PARAM, key);
        if self.etag_in_path {
            format!("/{}", path.replace(ETAG_PARAM, etag.as_str()))
        } else {
            format!("/{}?etag={}", path, etag)
        }
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.template)
    }
}

/// Process-wide route configuration shared by URL and tag helpers
#[derive(Debug, Default)]
pub struct Router {
    pattern: ArcSwapOption<RoutePattern>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(pattern: RoutePattern) -> Self {
        let router = Self::new();
        router.set_pattern(pattern);
        router
    }

    /// Parse and install a route pattern, replacing any previous one
    pub fn configure(&self, pattern: &str) -> ResPackResult<()> {
        self.set_pattern(RoutePattern::parse(pattern)?);
        Ok(())
    }

    pub fn set_pattern(&self, pattern: RoutePattern) {
        self.pattern.store(Some(Arc::new(pattern)));
    }

    pub fn pattern(&self) -> Option<Arc<RoutePattern>> {
        self.pattern.load_full()
    }

    /// URL of the package's current build.
    ///
    /// Uses the ETag without a freshness check, building first if needed.
    ///
    /// # Errors
    /// `NotConfigured` before a pattern is installed.
    pub fn url_for(&self, cache: &PackageCache, package: &Package) -> ResPackResult<String> {
        let pattern = self.pattern().ok_or(ResPackError::NotConfigured)?;
        let etag = cache.etag(package, false)?;
        Ok(pattern.url(package.key(), &etag))
    }

    /// HTML tag referencing the package, chosen by its content kind
    pub fn tag_for(&self, cache: &PackageCache, package: &Package) -> ResPackResult<String> {
        let url = self.url_for(cache, package)?;
        Ok(match package.kind() {
            ContentKind::Script => script_tag(&url),
            ContentKind::Stylesheet => stylesheet_tag(&url),
        })
    }
}

pub fn script_tag(url: &str) -> String {
    format!(
        "<script type=\"text/javascript\" src=\"{}\"></script>",
        escape_attribute(url)
    )
}

pub fn stylesheet_tag(url: &str) -> String {
    format!(
        "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" />",
        escape_attribute(url)
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
