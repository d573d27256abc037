//! Package cache - the rebuild and invalidation engine
//!
//! A package is rebuilt when it has no build, when its invalidation epoch
//! moved past the installed build (push notification or explicit
//! invalidation), or when a freshness check finds a source whose
//! modification time no longer matches the installed signature.
//!
//! Rebuilds run synchronously under the package's own lock. There is no
//! timeout: a source read that hangs stalls every reader of that package
//! that needs a rebuild, and nobody else.

use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::entities::{CachedBuild, Package, SourceSignature, SourceStamp, WatchState};
use crate::domain::ports::{
    CacheEvent, CacheEventSink, ChangeCallback, FileSource, MinifierSet, NoopEventSink,
};
use crate::domain::value_objects::{ETag, EtagStrategy, VirtualPath};
use crate::error::{ResPackError, ResPackResult};

/// Written after every source, keeps tokens of adjacent files apart
pub const SOURCE_SEPARATOR: &str = "\n\n";

/// Inline replacement for a source that could not be read
pub fn missing_source_marker(path: &VirtualPath) -> String {
    format!("/* respack error: missing source {} */", path)
}

/// Cache behavior knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    pub etag_strategy: EtagStrategy,
    /// Check source modification times on every `content`/`build` call,
    /// not only on forced ETag checks
    pub verify_on_read: bool,
    /// Ask the file source for push notifications after the first build
    pub watch: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            etag_strategy: EtagStrategy::BuildTime,
            verify_on_read: false,
            watch: true,
        }
    }
}

/// Builds, memoizes and invalidates package content
pub struct PackageCache {
    source: Arc<dyn FileSource>,
    minifiers: MinifierSet,
    options: CacheOptions,
    events: Arc<dyn CacheEventSink>,
}

impl PackageCache {
    pub fn new(source: Arc<dyn FileSource>) -> Self {
        Self {
            source,
            minifiers: MinifierSet::new(),
            options: CacheOptions::default(),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_minifiers(mut self, minifiers: MinifierSet) -> Self {
        self.minifiers = minifiers;
        self
    }

    pub fn with_options(mut self, options: CacheOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn CacheEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Combined content of `package`, rebuilding if needed
    pub fn content(&self, package: &Package) -> ResPackResult<Arc<str>> {
        Ok(self.build(package, false)?.content_arc())
    }

    /// Version token of the current build.
    ///
    /// With `force_refresh_check` the sources' modification times are
    /// compared against the build first (unless changes are pushed).
    pub fn etag(&self, package: &Package, force_refresh_check: bool) -> ResPackResult<ETag> {
        Ok(self.build(package, force_refresh_check)?.etag().clone())
    }

    /// The current fresh build; content and ETag taken from the returned
    /// value always belong together.
    pub fn build(
        &self,
        package: &Package,
        force_refresh_check: bool,
    ) -> ResPackResult<Arc<CachedBuild>> {
        let check_sources = force_refresh_check || self.options.verify_on_read;

        if let Some(build) = package.current() {
            if !self.is_stale(package, &build, check_sources) {
                return Ok(build);
            }
        }

        let _guard = package.lock_rebuild();

        // Whoever held the lock before us may already have rebuilt.
        if let Some(build) = package.current() {
            if !self.is_stale(package, &build, check_sources) {
                return Ok(build);
            }
        }

        self.rebuild_locked(package)
    }

    /// Rebuild unconditionally.
    ///
    /// Waits for any rebuild in progress on the same package.
    pub fn rebuild(&self, package: &Package) -> ResPackResult<Arc<CachedBuild>> {
        let _guard = package.lock_rebuild();
        self.rebuild_locked(package)
    }

    /// Mark the installed build stale; the next request rebuilds
    pub fn invalidate(&self, package: &Package) {
        package.invalidate();
        self.events.on_event(CacheEvent::Invalidated {
            key: package.key().to_string(),
            path: None,
        });
    }

    /// Whether `build` no longer reflects its package's sources.
    ///
    /// `check_sources` compares modification times even for watched
    /// packages: notifications arrive asynchronously and may lag an edit.
    pub fn is_stale(&self, package: &Package, build: &CachedBuild, check_sources: bool) -> bool {
        if package.is_invalidated(build) {
            return true;
        }
        if !check_sources {
            return false;
        }
        build
            .signature()
            .is_outdated(|location| self.source.modified(location))
    }

    fn rebuild_locked(&self, package: &Package) -> ResPackResult<Arc<CachedBuild>> {
        let key = package.key().to_string();
        self.events
            .on_event(CacheEvent::RebuildStarted { key: key.clone() });
        tracing::debug!(package = %key, "rebuilding package");

        match self.combine(package) {
            Ok(build) => {
                let build = Arc::new(build);
                package.install(Arc::clone(&build));

                if self.options.watch && package.needs_watch() {
                    self.register_watch(package, &build);
                }

                self.events.on_event(CacheEvent::RebuildCompleted {
                    key,
                    etag: build.etag().to_string(),
                    bytes: build.len(),
                    missing: build.missing().len(),
                });
                Ok(build)
            }
            Err(err) => {
                self.events.on_event(CacheEvent::RebuildFailed {
                    key,
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Read, minify and concatenate every source in order
    fn combine(&self, package: &Package) -> ResPackResult<CachedBuild> {
        let definition = package.definition();
        // Observed before reading: a change that lands mid-build leaves
        // this build stale.
        let epoch = package.epoch();

        let mut content = String::new();
        let mut stamps = Vec::with_capacity(definition.sources().len());
        let mut missing = Vec::new();

        for path in definition.sources() {
            let location = self.source.resolve(path)?;

            match self.source.read(&location) {
                Ok(file) => {
                    if definition.minify() {
                        let minified = self
                            .minifiers
                            .get(definition.kind())
                            .minify(&file.content)
                            .map_err(|source| ResPackError::Minify {
                                kind: definition.kind(),
                                path: path.to_string(),
                                source,
                            })?;
                        content.push_str(&minified);
                    } else {
                        content.push_str(&file.content);
                    }
                    stamps.push(SourceStamp {
                        path: path.clone(),
                        location,
                        modified: Some(file.modified),
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        package = %definition.key(),
                        source = %path,
                        error = %err,
                        "missing package source"
                    );
                    self.events.on_event(CacheEvent::SourceMissing {
                        key: definition.key().to_string(),
                        path: path.to_string(),
                        error: err.to_string(),
                    });
                    content.push_str(&missing_source_marker(path));
                    missing.push(path.clone());
                    stamps.push(SourceStamp {
                        path: path.clone(),
                        location,
                        modified: None,
                    });
                }
            }

            content.push_str(SOURCE_SEPARATOR);
        }

        let built_at = next_build_time(package.current().as_deref());
        let etag = ETag::derive(self.options.etag_strategy, built_at, &content);

        Ok(CachedBuild::new(
            content,
            built_at,
            etag,
            SourceSignature::new(stamps),
            epoch,
            missing,
        ))
    }

    fn register_watch(&self, package: &Package, build: &CachedBuild) {
        let locations = build.signature().locations();
        let epoch = package.epoch_counter();
        let events = Arc::clone(&self.events);
        let key = package.key().to_string();

        let on_change: ChangeCallback = Arc::new(move |path: &Path| {
            epoch.fetch_add(1, Ordering::AcqRel);
            tracing::debug!(package = %key, path = %path.display(), "package source changed");
            events.on_event(CacheEvent::Invalidated {
                key: key.clone(),
                path: Some(path.to_path_buf()),
            });
        });

        match self.source.watch(&locations, on_change) {
            Ok(Some(handle)) => {
                package.set_watch(WatchState::Active(handle));
                // Changes between reading and subscribing produced no event.
                if build
                    .signature()
                    .is_outdated(|location| self.source.modified(location))
                {
                    package.invalidate();
                }
            }
            Ok(None) => package.set_watch(WatchState::Unsupported),
            Err(err) => {
                tracing::warn!(package = %package.key(), error = %err, "cannot watch package sources");
                self.events.on_event(CacheEvent::WatchUnavailable {
                    key: package.key().to_string(),
                    error: err.to_string(),
                });
                package.set_watch(WatchState::Unsupported);
            }
        }
    }
}

impl std::fmt::Debug for PackageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageCache")
            .field("minifiers", &self.minifiers)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Build timestamp strictly after the build being replaced
fn next_build_time(previous: Option<&CachedBuild>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev.built_at() => prev.built_at() + TimeDelta::nanoseconds(1),
        _ => now,
    }
}
