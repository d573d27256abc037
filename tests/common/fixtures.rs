//! Test fixtures - reusable content constants for tests.

pub const LIB_JS: &str = "var x=1;";
pub const APP_JS: &str = "x+=1;";
pub const SITE_CSS: &str = "body { color: red; }";

/// `LIB_JS` and `APP_JS` combined in that order
pub const SITE_JS_COMBINED: &str = "var x=1;\n\nx+=1;\n\n";

/// One script and one stylesheet package, no minifiers, routing set
pub const BASIC_CONFIG: &str = r#"
[source]
root = "public"

[routing]
pattern = "/content/{etag}/{key}"

[[package]]
key = "site-js"
kind = "script"
minify = false
sources = ["~/js/lib.js", "~/js/app.js"]

[[package]]
key = "site-css"
kind = "stylesheet"
minify = false
sources = ["/css/site.css"]
"#;

/// Site files matching `BASIC_CONFIG`
pub const BASIC_FILES: &[(&str, &str)] = &[
    ("public/js/lib.js", LIB_JS),
    ("public/js/app.js", APP_JS),
    ("public/css/site.css", SITE_CSS),
];
