//! Common utilities shared across the mimesniff codebase.

use std::collections::HashSet;
use std::hash::Hash;

/// Keep the first item for each key, preserving order.
///
/// ```rust
/// use mimesniff::common::unique_by;
///
/// let words = vec!["apple", "avocado", "banana"];
/// assert_eq!(unique_by(words, |w| w.chars().next()), vec!["apple", "banana"]);
/// ```
pub fn unique_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}
