//! Property tests for ETag derivation and matching.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use respack::{ETag, EtagStrategy};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Tokens are always 16 lowercase hex characters.
    #[test]
    fn property_tokens_are_fixed_width_hex(
        content in "(?s).{0,512}",
        nanos in 0i64..4_000_000_000_000_000_000,
    ) {
        let at = Utc.timestamp_nanos(nanos);
        for strategy in [EtagStrategy::BuildTime, EtagStrategy::ContentHash] {
            let etag = ETag::derive(strategy, at, &content);
            prop_assert_eq!(etag.as_str().len(), 16);
            prop_assert!(etag
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    /// PROPERTY: Distinct build times give distinct build-time tokens.
    #[test]
    fn property_build_time_injective(a in 0i64..i64::MAX, b in 0i64..i64::MAX) {
        prop_assume!(a != b);
        prop_assert_ne!(
            ETag::from_build_time(Utc.timestamp_nanos(a)),
            ETag::from_build_time(Utc.timestamp_nanos(b))
        );
    }

    /// PROPERTY: A token matches its own header forms.
    #[test]
    fn property_matches_own_header_forms(content in ".{0,64}") {
        let etag = ETag::from_content(&content);
        prop_assert!(etag.matches_header(etag.as_str()));
        prop_assert!(etag.matches_header(&etag.quoted()));
        let weak = format!("W/{}", etag.quoted());
        prop_assert!(etag.matches_header(&weak));
        let list = format!("\"0000000000000000\", {}", etag.quoted());
        prop_assert!(etag.matches_header(&list));
    }
}
