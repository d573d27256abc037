//! Scenario: a page links a package and a browser revalidates it

use std::sync::Arc;

use respack::domain::ports::NoopEventSink;
use respack::{create_runtime, Config, PackageRequest};

use crate::common::*;

fn runtime(env: &TestEnv) -> respack::Runtime {
    let config = Config::load(&env.project_path("respack.toml")).unwrap();
    let mut config = config;
    config.source.watch = false;
    create_runtime(&config, Arc::new(NoopEventSink)).unwrap()
}

#[test]
fn scenario_page_link_then_conditional_get() {
    let env = TestEnv::with_site(BASIC_CONFIG, BASIC_FILES);
    let runtime = runtime(&env);

    // The page embeds a versioned URL
    let url = runtime.url("site-js").unwrap();
    let etag = url
        .strip_prefix("/content/")
        .and_then(|rest| rest.strip_suffix("/site-js"))
        .unwrap()
        .to_string();

    // First fetch: full body with long-lived caching headers
    let first = runtime.respond("site-js", &PackageRequest::new()).unwrap();
    assert_eq!(first.status, 200);
    assert_eq!(first.body, SITE_JS_COMBINED.as_bytes());
    assert_eq!(first.header("ETag"), Some(format!("\"{}\"", etag).as_str()));
    assert_eq!(
        first.header("Cache-Control"),
        Some("public, max-age=31536000")
    );

    // Revalidation: nothing changed
    let again = runtime
        .respond("site-js", &PackageRequest::new().if_none_match(format!("\"{}\"", etag)))
        .unwrap();
    assert!(again.is_not_modified());
    assert!(again.body.is_empty());

    // A deploy changes a source; the old token no longer matches
    std::thread::sleep(std::time::Duration::from_millis(1100));
    env.write_project_file("public/js/app.js", "x+=2;");
    let changed = runtime
        .respond("site-js", &PackageRequest::new().if_none_match(format!("\"{}\"", etag)))
        .unwrap();
    assert_eq!(changed.status, 200);
    assert_eq!(changed.body, b"var x=1;\n\nx+=2;\n\n");
    assert_ne!(runtime.url("site-js").unwrap(), url);
}

#[test]
fn scenario_stylesheet_tag_and_gzip() {
    let env = TestEnv::with_site(BASIC_CONFIG, BASIC_FILES);
    let runtime = runtime(&env);
    let package = runtime.package("site-css").unwrap();

    let tag = runtime.router().tag_for(runtime.cache(), &package).unwrap();
    assert!(tag.starts_with("<link rel=\"stylesheet\" type=\"text/css\" href=\"/content/"));

    let response = runtime
        .respond("site-css", &PackageRequest::new().accept_encoding("gzip, deflate, br"))
        .unwrap();
    assert_eq!(response.header("Content-Type"), Some("text/css"));
    assert_eq!(response.header("Content-Encoding"), Some("gzip"));
    assert_eq!(response.header("Vary"), Some("Accept-Encoding"));
}
