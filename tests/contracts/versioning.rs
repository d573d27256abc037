//! Versioning contracts
//!
//! The ETag identifies a build: it is stable while nothing changes and
//! moves whenever a checked request observes a changed source.

use std::sync::Arc;

use respack::{CacheOptions, EtagStrategy, MemoryFileSource, PackageCache, Registry};

use crate::common::*;

fn site(options: CacheOptions) -> (Arc<MemoryFileSource>, Registry, PackageCache) {
    let source = Arc::new(MemoryFileSource::new());
    source.write("/js/lib.js", LIB_JS);
    source.write("/js/app.js", APP_JS);
    let cache = PackageCache::new(source.clone()).with_options(options);
    let registry = Registry::new();
    registry
        .load_script("site-js", false, ["/js/lib.js", "/js/app.js"])
        .unwrap();
    (source, registry, cache)
}

/// CONTRACT: ETag and content always come from the same build
mod coherence {
    use super::*;

    #[test]
    fn contract_build_etag_matches_content_hash() {
        let (_source, registry, cache) = site(CacheOptions {
            etag_strategy: EtagStrategy::ContentHash,
            ..CacheOptions::default()
        });
        let package = registry.get("site-js").unwrap();

        let build = cache.build(&package, true).unwrap();

        assert_eq!(build.etag(), &respack::ETag::from_content(build.content()));
    }

    #[test]
    fn contract_etag_is_stable_without_changes() {
        let (_source, registry, cache) = site(CacheOptions::default());
        let package = registry.get("site-js").unwrap();

        let etags: Vec<_> = (0..5).map(|_| cache.etag(&package, true).unwrap()).collect();

        assert!(etags.windows(2).all(|w| w[0] == w[1]));
    }
}

/// CONTRACT: A checked request observes every source change
mod freshness {
    use super::*;

    #[test]
    fn contract_modified_source_changes_etag() {
        let (source, registry, cache) = site(CacheOptions::default());
        let package = registry.get("site-js").unwrap();
        let before = cache.etag(&package, true).unwrap();

        source.write("/js/app.js", "x+=2;");

        let after = cache.etag(&package, true).unwrap();
        assert_ne!(before, after);
        assert_eq!(&*cache.content(&package).unwrap(), "var x=1;\n\nx+=2;\n\n");
    }

    #[test]
    fn contract_removed_source_changes_etag() {
        let (source, registry, cache) = site(CacheOptions::default());
        let package = registry.get("site-js").unwrap();
        let before = cache.etag(&package, true).unwrap();

        source.remove("/js/lib.js");

        assert_ne!(cache.etag(&package, true).unwrap(), before);
        crate::assert_marker_for!(cache.content(&package).unwrap(), "/js/lib.js");
    }

    #[test]
    fn contract_pushed_change_needs_no_check() {
        let source = Arc::new(MemoryFileSource::with_push());
        source.write("/js/app.js", APP_JS);
        let cache = PackageCache::new(source.clone());
        let registry = Registry::new();
        let package = registry.load_script("app", false, ["/js/app.js"]).unwrap();
        let before = cache.etag(&package, false).unwrap();

        source.write("/js/app.js", "x+=3;");

        assert_ne!(cache.etag(&package, false).unwrap(), before);
    }
}
