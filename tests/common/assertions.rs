//! Custom assertion macros for contract, scenario and CLI tests.

/// Assert that CLI output contains a string.
///
/// # Example
/// ```ignore
/// assert_output_contains!(result, "site-js");
/// ```
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let output = $result.combined_output();
        assert!(
            output.contains($needle),
            "Expected output to contain '{}'.\nOutput:\n{}",
            $needle,
            output
        );
    };
}

/// Assert that combined content carries the missing-source marker for a path.
///
/// # Example
/// ```ignore
/// assert_marker_for!(content, "/js/gone.js");
/// ```
#[macro_export]
macro_rules! assert_marker_for {
    ($content:expr, $path:expr) => {
        let marker = format!("/* respack error: missing source {} */", $path);
        assert!(
            $content.contains(&marker),
            "Expected marker '{}' in content:\n{}",
            marker,
            $content
        );
    };
}
