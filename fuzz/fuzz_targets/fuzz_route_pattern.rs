#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(pattern) = respack::RoutePattern::parse(raw) {
            let etag = respack::ETag::from_content(raw);
            let _ = pattern.url("site-js", &etag);
        }
        let _ = respack::serve::Encoding::negotiate(Some(raw));
    }
});
