//! Property tests for virtual path validation.

use std::path::{Component, Path};

use proptest::prelude::*;

use respack::VirtualPath;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,15}")
        .unwrap()
        .prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=5).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,256}") {
        let _ = VirtualPath::parse(&s);
    }

    /// PROPERTY: Anything accepted resolves strictly below the root.
    #[test]
    fn property_accepted_paths_stay_below_root(s in "[~/A-Za-z0-9._-]{0,48}") {
        if let Ok(path) = VirtualPath::parse(&s) {
            let root = Path::new("/srv/site");
            let resolved = path.to_path_under(root);
            prop_assert!(resolved.starts_with(root));
            prop_assert!(resolved != root);
            prop_assert!(resolved
                .components()
                .all(|c| matches!(c, Component::RootDir | Component::Normal(_))));
        }
    }

    /// PROPERTY: `~/x` and `/x` are accepted together and resolve alike.
    #[test]
    fn property_tilde_and_slash_equivalent(relative in relative_path()) {
        let tilde = VirtualPath::parse(&format!("~/{}", relative)).unwrap();
        let slash = VirtualPath::parse(&format!("/{}", relative)).unwrap();

        prop_assert_eq!(tilde.relative(), relative.as_str());
        prop_assert_eq!(
            tilde.to_path_under(Path::new("/r")),
            slash.to_path_under(Path::new("/r"))
        );
    }

    /// PROPERTY: Paths without a root prefix are always rejected.
    #[test]
    fn property_unrooted_rejected(relative in relative_path()) {
        prop_assume!(!relative.starts_with('~'));
        prop_assert!(VirtualPath::parse(&relative).is_err());
    }

    /// PROPERTY: A parent segment anywhere is rejected.
    #[test]
    fn property_traversal_rejected(
        before in proptest::collection::vec(segment(), 0..3),
        after in proptest::collection::vec(segment(), 0..3),
    ) {
        let mut segments = before;
        segments.push("..".to_string());
        segments.extend(after);
        let path = format!("/{}", segments.join("/"));
        prop_assert!(VirtualPath::parse(&path).is_err());
    }
}
