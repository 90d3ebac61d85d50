//! Domain-specific assertion macros for liteconf harnesses.
//!
//! These wrap `pretty_assertions` so a failing comparison shows a diff of
//! `(key, value)` pairs or file lines instead of two opaque debug dumps.

use liteconf::Entry;

/// Borrow a slice of entries as `(key, value)` string pairs.
pub fn as_pairs(entries: &[Entry]) -> Vec<(&str, &str)> {
    entries
        .iter()
        .map(|e| (e.key.as_str(), e.value.as_str()))
        .collect()
}

/// Assert that a slice of entries equals a list of `(key, value)` pairs, in
/// order.
///
/// ```rust
/// assert_entries!(store.all().unwrap(), [("a", "1"), ("b", "2")]);
/// ```
#[macro_export]
macro_rules! assert_entries {
    ($entries:expr, [$(($k:expr, $v:expr)),* $(,)?]) => {{
        let entries: &[liteconf::Entry] = &$entries;
        let expected: Vec<(&str, &str)> = vec![$(($k, $v)),*];
        pretty_assertions::assert_eq!(
            $crate::common::as_pairs(entries),
            expected,
            "assert_entries! failed: store contents differ"
        );
    }};
}

/// Assert the exact text of a store file.
///
/// ```rust
/// assert_file!(file, "a=1\nb=2\n");
/// ```
#[macro_export]
macro_rules! assert_file {
    ($file:expr, $expected:expr) => {{
        let actual = $file.contents();
        let expected: &str = $expected;
        pretty_assertions::assert_eq!(
            actual.lines().collect::<Vec<_>>(),
            expected.lines().collect::<Vec<_>>(),
            "assert_file! failed: {}",
            $file.path().display()
        );
        assert_eq!(
            actual, expected,
            "assert_file! failed: trailing newline differs"
        );
    }};
}

/// Assert that a `Result` failed with the given `liteconf::Error` pattern,
/// optionally with a guard.
///
/// ```rust
/// assert_err!(store.remove_last(), Error::EmptyStore);
/// assert_err!(store.set_value("k", "v"), Error::KeyNotFound(ref k) if k == "k");
/// ```
#[macro_export]
macro_rules! assert_err {
    ($result:expr, $pattern:pat $(if $guard:expr)?) => {{
        match $result {
            Err($pattern) $(if $guard)? => {}
            Err(other) => panic!(
                "assert_err! failed:\n  expected: {}\n  actual:   {:?}",
                stringify!($pattern),
                other
            ),
            Ok(_) => panic!(
                "assert_err! failed: expected {}, got Ok",
                stringify!($pattern)
            ),
        }
    }};
}
