//! Virtual path contracts
//!
//! Only rooted paths (`~/` or `/`) that stay below the root are accepted.

use respack::VirtualPath;

#[test]
fn contract_rooted_forms_accepted() {
    for path in ["~/js/app.js", "/js/app.js", "/app.js", "~/a/b/c.css"] {
        assert!(VirtualPath::parse(path).is_ok(), "{path} should be accepted");
    }
}

#[test]
fn contract_unrooted_or_escaping_forms_rejected() {
    for path in [
        "",
        "app.js",
        "js/app.js",
        "~",
        "~/",
        "/",
        "~/../etc/passwd",
        "/js/../../app.js",
        "/js//app.js",
        "/js/./app.js",
        "\\js\\app.js",
        "C:/js/app.js",
    ] {
        assert!(VirtualPath::parse(path).is_err(), "{path:?} should be rejected");
    }
}

#[test]
fn contract_tilde_and_slash_name_the_same_file() {
    let root = std::path::Path::new("/srv/site");
    let tilde = VirtualPath::parse("~/js/app.js").unwrap();
    let slash = VirtualPath::parse("/js/app.js").unwrap();

    assert_eq!(tilde.to_path_under(root), slash.to_path_under(root));
    assert_eq!(tilde.relative(), "js/app.js");
}

#[test]
fn contract_error_names_offending_path() {
    let err = VirtualPath::parse("js/app.js").unwrap_err();
    let message = err.to_string();

    assert!(message.contains("[js/app.js]"), "{message}");
    assert!(message.contains("'~/'"), "{message}");
}
