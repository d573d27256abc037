//! Package entity - a definition plus its cached build slot
//!
//! Concurrency contract:
//! - Readers load the current build with one atomic pointer read and never
//!   touch the rebuild lock.
//! - Only the holder of the rebuild lock installs a new build.
//! - The invalidation epoch is bumped from watcher threads; a build whose
//!   epoch is behind the package's is stale.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwapOption;

use super::build::CachedBuild;
use super::definition::PackageDefinition;
use crate::domain::ports::WatchHandle;
use crate::domain::value_objects::ContentKind;

/// Push-invalidation registration state
#[derive(Debug)]
pub(crate) enum WatchState {
    Unregistered,
    /// The file source cannot push, or registration failed
    Unsupported,
    Active(#[allow(dead_code)] WatchHandle),
}

/// A registered package
#[derive(Debug)]
pub struct Package {
    definition: PackageDefinition,
    current: ArcSwapOption<CachedBuild>,
    rebuild_lock: Mutex<()>,
    epoch: Arc<AtomicU64>,
    watch: Mutex<WatchState>,
    push_active: AtomicBool,
}

impl Package {
    pub fn new(definition: PackageDefinition) -> Self {
        Self {
            definition,
            current: ArcSwapOption::empty(),
            rebuild_lock: Mutex::new(()),
            epoch: Arc::new(AtomicU64::new(0)),
            watch: Mutex::new(WatchState::Unregistered),
            push_active: AtomicBool::new(false),
        }
    }

    pub fn definition(&self) -> &PackageDefinition {
        &self.definition
    }

    pub fn key(&self) -> &str {
        self.definition.key()
    }

    pub fn kind(&self) -> ContentKind {
        self.definition.kind()
    }

    pub fn mime_type(&self) -> &'static str {
        self.definition.mime_type()
    }

    /// The installed build, if any. Never blocks.
    pub fn current(&self) -> Option<Arc<CachedBuild>> {
        self.current.load_full()
    }

    /// Current invalidation epoch
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Mark the installed build stale; returns the new epoch
    pub fn invalidate(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Whether change notifications are being pushed for this package
    pub fn is_watched(&self) -> bool {
        self.push_active.load(Ordering::Acquire)
    }

    /// Whether `build` predates an invalidation
    pub fn is_invalidated(&self, build: &CachedBuild) -> bool {
        build.epoch() < self.epoch()
    }

    pub(crate) fn lock_rebuild(&self) -> MutexGuard<'_, ()> {
        // A panicking builder never installs a partial build, so the slot is
        // consistent even when the lock is poisoned.
        self.rebuild_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn install(&self, build: Arc<CachedBuild>) {
        self.current.store(Some(build));
    }

    pub(crate) fn epoch_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.epoch)
    }

    pub(crate) fn needs_watch(&self) -> bool {
        matches!(
            *self.watch.lock().unwrap_or_else(PoisonError::into_inner),
            WatchState::Unregistered
        )
    }

    pub(crate) fn set_watch(&self, state: WatchState) {
        let active = matches!(state, WatchState::Active(_));
        *self.watch.lock().unwrap_or_else(PoisonError::into_inner) = state;
        self.push_active.store(active, Ordering::Release);
    }
}
