//! Scenario: a developer edits package sources while the site is running

use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use respack::{CacheOptions, LocalFileSource, PackageCache, Registry};
use tempfile::tempdir;

use crate::common::*;

fn write(root: &std::path::Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Poll until `check` holds or a few seconds pass
fn eventually(mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    check()
}

#[test]
fn scenario_watched_edit_is_served_without_checks() {
    let dir = tempdir().unwrap();
    write(dir.path(), "js/lib.js", LIB_JS);
    write(dir.path(), "js/app.js", APP_JS);

    let cache = PackageCache::new(Arc::new(LocalFileSource::new(dir.path())));
    let registry = Registry::new();
    let package = registry
        .load_script("site-js", false, ["~/js/lib.js", "~/js/app.js"])
        .unwrap();
    assert_eq!(&*cache.content(&package).unwrap(), SITE_JS_COMBINED);
    assert!(package.is_watched());

    write(dir.path(), "js/app.js", "x+=42;");

    assert!(
        eventually(|| cache.content(&package).unwrap().contains("x+=42;")),
        "edit never reached the package"
    );
}

#[test]
fn scenario_watched_edit_is_seen_by_next_checked_request() {
    let dir = tempdir().unwrap();
    write(dir.path(), "js/app.js", APP_JS);

    let cache = PackageCache::new(Arc::new(LocalFileSource::new(dir.path())));
    let registry = Registry::new();
    let package = registry.load_script("site-js", false, ["/js/app.js"]).unwrap();
    let before = cache.etag(&package, true).unwrap();
    assert!(package.is_watched());

    // Move the mtime without waiting for the watcher to report it
    let file = fs::File::options()
        .write(true)
        .open(dir.path().join("js/app.js"))
        .unwrap();
    file.set_modified(std::time::SystemTime::now() + Duration::from_secs(60))
        .unwrap();
    drop(file);

    assert_ne!(cache.etag(&package, true).unwrap(), before);
}

#[test]
fn scenario_unwatched_edit_needs_a_checked_request() {
    let dir = tempdir().unwrap();
    write(dir.path(), "css/site.css", SITE_CSS);

    let source = LocalFileSource::new(dir.path()).with_watch(false);
    let cache = PackageCache::new(Arc::new(source));
    let registry = Registry::new();
    let package = registry
        .load_stylesheet("site-css", false, ["/css/site.css"])
        .unwrap();
    let before = cache.etag(&package, true).unwrap();
    assert!(!package.is_watched());

    // Coarse file systems record whole seconds
    std::thread::sleep(Duration::from_millis(1100));
    write(dir.path(), "css/site.css", "body { color: blue; }");

    assert_eq!(cache.etag(&package, false).unwrap(), before);
    assert_ne!(cache.etag(&package, true).unwrap(), before);
    assert_eq!(
        &*cache.content(&package).unwrap(),
        "body { color: blue; }\n\n"
    );
}

#[test]
fn scenario_deleted_then_restored_source() {
    let dir = tempdir().unwrap();
    write(dir.path(), "js/lib.js", LIB_JS);
    write(dir.path(), "js/app.js", APP_JS);

    let source = LocalFileSource::new(dir.path()).with_watch(false);
    let cache = PackageCache::new(Arc::new(source)).with_options(CacheOptions {
        verify_on_read: true,
        ..CacheOptions::default()
    });
    let registry = Registry::new();
    let package = registry
        .load_script("site-js", false, ["/js/lib.js", "/js/app.js"])
        .unwrap();
    cache.content(&package).unwrap();

    fs::remove_file(dir.path().join("js/app.js")).unwrap();
    crate::assert_marker_for!(cache.content(&package).unwrap(), "/js/app.js");

    write(dir.path(), "js/app.js", APP_JS);
    assert_eq!(&*cache.content(&package).unwrap(), SITE_JS_COMBINED);
}
