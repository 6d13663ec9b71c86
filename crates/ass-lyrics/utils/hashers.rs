//! Hash map construction with ahash
//!
//! Style lookups happen once per dialogue line, so the resolver keeps styles
//! in an ahash-backed map instead of scanning the section.

use ahash::RandomState;
use std::collections::HashMap;

/// Create a new `HashMap` using ahash
///
/// # Example
///
/// ```rust
/// use ass_lyrics::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<&str, i32>();
/// map.insert("MainStyle", 1);
/// assert_eq!(map.get("MainStyle"), Some(&1));
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> HashMap<K, V, RandomState> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashMap` with specific capacity using ahash
#[must_use]
pub fn create_hash_map_with_capacity<K, V>(capacity: usize) -> HashMap<K, V, RandomState> {
    HashMap::with_capacity_and_hasher(capacity, RandomState::new())
}
