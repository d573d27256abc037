//! Property tests for package combining.

use std::sync::Arc;

use proptest::prelude::*;

use respack::{MemoryFileSource, PackageCache, Registry};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Content is the concatenation of each source plus "\n\n",
    /// with a marker for every absent source.
    #[test]
    fn property_content_is_ordered_concatenation(
        files in proptest::collection::vec(proptest::option::of("[a-z =;]{0,24}"), 1..6)
    ) {
        let source = Arc::new(MemoryFileSource::new());
        let mut paths = Vec::new();
        let mut expected = String::new();
        for (i, content) in files.iter().enumerate() {
            let path = format!("/src/{}.js", i);
            match content {
                Some(content) => {
                    source.write(&path, content.clone());
                    expected.push_str(content);
                }
                None => {
                    expected.push_str(&format!("/* respack error: missing source {} */", path));
                }
            }
            expected.push_str("\n\n");
            paths.push(path);
        }

        let cache = PackageCache::new(source);
        let package = Registry::new().load_script("p", false, &paths).unwrap();

        prop_assert_eq!(&*cache.content(&package).unwrap(), expected.as_str());
    }
}
