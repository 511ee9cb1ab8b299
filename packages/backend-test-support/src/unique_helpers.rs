//! Unique test data so suites sharing one database never collide on the
//! `drinks.title` unique index.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("drink");
/// let b = unique_str("drink");
/// assert_ne!(a, b);
/// assert!(a.starts_with("drink-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A drink title that is unique per call and fits the 80-char column.
pub fn unique_title(prefix: &str) -> String {
    let mut title = unique_str(prefix);
    title.truncate(80);
    title
}
