//! Package registry
//!
//! A keyed store holding at most one `Package` per key. Creation runs the
//! caller's factory under a registry-wide lock held only for the
//! check-and-insert; builds happen later, under each package's own lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{Package, PackageDefinition};
use crate::domain::value_objects::ContentKind;
use crate::error::{ResPackError, ResPackResult};

/// Keyed store of packages
#[derive(Debug, Default)]
pub struct Registry {
    packages: Mutex<HashMap<String, Arc<Package>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the package for `key`, creating it with `factory` on first use.
    ///
    /// The factory runs at most once per key. Concurrent callers for a key
    /// that is being created block until it is registered and then receive
    /// the same package. A failing factory registers nothing.
    pub fn get_or_create<F>(&self, key: &str, factory: F) -> ResPackResult<Arc<Package>>
    where
        F: FnOnce() -> ResPackResult<PackageDefinition>,
    {
        let mut packages = self.lock();

        if let Some(package) = packages.get(key) {
            return Ok(Arc::clone(package));
        }

        let definition = factory()?;
        if definition.key() != key {
            return Err(ResPackError::KeyMismatch {
                expected: key.to_string(),
                actual: definition.key().to_string(),
            });
        }

        let package = Arc::new(Package::new(definition));
        packages.insert(key.to_string(), Arc::clone(&package));
        tracing::debug!(package = %key, "registered package");
        Ok(package)
    }

    /// Get a registered package
    ///
    /// # Errors
    /// `NotFound` if nothing was registered under `key`.
    pub fn get(&self, key: &str) -> ResPackResult<Arc<Package>> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| ResPackError::NotFound {
                key: key.to_string(),
            })
    }

    /// Register (or fetch) a package of `kind` built from `sources`.
    ///
    /// An empty source list is rejected even when `key` already exists.
    pub fn load<I, S>(
        &self,
        key: &str,
        kind: ContentKind,
        minify: bool,
        sources: I,
    ) -> ResPackResult<Arc<Package>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sources: Vec<S> = sources.into_iter().collect();
        if sources.is_empty() {
            return Err(ResPackError::EmptyPackage {
                key: key.to_string(),
            });
        }
        self.get_or_create(key, || {
            PackageDefinition::new(key, kind, minify, sources)
        })
    }

    pub fn load_script<I, S>(&self, key: &str, minify: bool, sources: I) -> ResPackResult<Arc<Package>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.load(key, ContentKind::Script, minify, sources)
    }

    pub fn load_stylesheet<I, S>(
        &self,
        key: &str,
        minify: bool,
        sources: I,
    ) -> ResPackResult<Arc<Package>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.load(key, ContentKind::Stylesheet, minify, sources)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Registered packages, sorted by key
    pub fn packages(&self) -> Vec<Arc<Package>> {
        let mut packages: Vec<Arc<Package>> = self.lock().values().cloned().collect();
        packages.sort_by(|a, b| a.key().cmp(b.key()));
        packages
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Package>>> {
        self.packages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
