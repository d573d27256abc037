//! Runtime Factory
//!
//! Wires a `Config` into a registry, a cache over the local file system,
//! external minifiers and a router. This is the dependency injection
//! point for the binary and for hosts embedding respack.

use std::sync::Arc;
use std::time::Duration;

use crate::application::{CacheOptions, PackageCache, Registry};
use crate::config::Config;
use crate::domain::entities::Package;
use crate::domain::ports::{CacheEventSink, MinifierSet};
use crate::domain::value_objects::ContentKind;
use crate::error::ResPackResult;
use crate::infrastructure::{CommandMinifier, LocalFileSource};
use crate::serve::{respond, PackageRequest, PackageResponse, ResponseOptions, Router};

/// Everything needed to build and serve the configured packages
#[derive(Debug)]
pub struct Runtime {
    registry: Registry,
    cache: PackageCache,
    router: Router,
    response: ResponseOptions,
}

impl Runtime {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn cache(&self) -> &PackageCache {
        &self.cache
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn response_options(&self) -> &ResponseOptions {
        &self.response
    }

    pub fn package(&self, key: &str) -> ResPackResult<Arc<Package>> {
        self.registry.get(key)
    }

    pub fn url(&self, key: &str) -> ResPackResult<String> {
        let package = self.registry.get(key)?;
        self.router.url_for(&self.cache, &package)
    }

    pub fn respond(&self, key: &str, request: &PackageRequest) -> ResPackResult<PackageResponse> {
        respond(&self.registry, &self.cache, key, request, &self.response)
    }
}

/// Build the minifier set from configured compressor command lines
pub fn create_minifiers(config: &Config) -> MinifierSet {
    let mut minifiers = MinifierSet::new();
    for kind in ContentKind::ALL {
        if let Some(command) = CommandMinifier::from_argv(config.minify.command_for(kind)) {
            tracing::debug!(kind = kind.as_str(), program = command.program(), "external minifier");
            minifiers.insert(kind, Arc::new(command));
        }
    }
    minifiers
}

/// Create a runtime with every `[[package]]` registered
pub fn create_runtime(config: &Config, events: Arc<dyn CacheEventSink>) -> ResPackResult<Runtime> {
    let source = LocalFileSource::new(&config.source.root).with_watch(config.source.watch);
    let cache = PackageCache::new(Arc::new(source))
        .with_minifiers(create_minifiers(config))
        .with_options(CacheOptions {
            etag_strategy: config.cache.etag,
            verify_on_read: config.cache.verify_on_read,
            watch: config.source.watch,
        })
        .with_event_sink(events);

    let router = Router::new();
    if let Some(pattern) = &config.routing.pattern {
        router.configure(pattern)?;
    }

    let registry = Registry::new();
    for package in &config.packages {
        registry.load(&package.key, package.kind, package.minify, &package.sources)?;
    }

    Ok(Runtime {
        registry,
        cache,
        router,
        response: ResponseOptions {
            cache_headers: true,
            compression: config.cache.compression,
            max_age: Duration::from_secs(config.cache.max_age_days.saturating_mul(24 * 60 * 60)),
        },
    })
}
