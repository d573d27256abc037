//! Scenario: packages minified through an external compressor

#![cfg(unix)]

use std::sync::Arc;

use respack::domain::ports::NoopEventSink;
use respack::{create_runtime, Config, ResPackError};

use crate::common::*;

const MINIFY_CONFIG: &str = r#"
[source]
root = "public"
watch = false

[minify]
script = ["tr", "-d", " "]

[[package]]
key = "site-js"
kind = "script"
sources = ["/js/spaced.js", "/js/app.js"]

[[package]]
key = "raw-js"
kind = "script"
minify = false
sources = ["/js/spaced.js"]
"#;

#[test]
fn scenario_configured_compressor_minifies_each_source() {
    let env = TestEnv::with_site(
        MINIFY_CONFIG,
        &[("public/js/spaced.js", "var a = 1;"), ("public/js/app.js", APP_JS)],
    );
    let config = Config::load(&env.project_path("respack.toml")).unwrap();
    let runtime = create_runtime(&config, Arc::new(NoopEventSink)).unwrap();

    let minified = runtime.package("site-js").unwrap();
    let raw = runtime.package("raw-js").unwrap();

    assert_eq!(&*runtime.cache().content(&minified).unwrap(), "vara=1;\n\nx+=1;\n\n");
    assert_eq!(&*runtime.cache().content(&raw).unwrap(), "var a = 1;\n\n");
}

#[test]
fn scenario_failing_compressor_fails_the_build() {
    let config_toml = MINIFY_CONFIG.replace(r#"["tr", "-d", " "]"#, r#"["sh", "-c", "exit 1"]"#);
    let env = TestEnv::with_site(
        &config_toml,
        &[("public/js/spaced.js", "var a = 1;"), ("public/js/app.js", APP_JS)],
    );
    let config = Config::load(&env.project_path("respack.toml")).unwrap();
    let runtime = create_runtime(&config, Arc::new(NoopEventSink)).unwrap();
    let package = runtime.package("site-js").unwrap();

    let err = runtime.cache().content(&package).unwrap_err();

    assert!(matches!(err, ResPackError::Minify { .. }));
    assert!(package.current().is_none());
}
