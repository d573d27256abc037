#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(path) = respack::VirtualPath::parse(raw) {
            let root = Path::new("/srv/site");
            assert!(path.to_path_under(root).starts_with(root));
        }
    }
});
