#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and validation must reject bad input without panicking
        if let Ok(config) = toml::from_str::<respack::Config>(content) {
            let _ = config.validate(Path::new("fuzz.toml"));
        }
    }
});
