//! Map and set types used across the workspace.
//!
//! With the default `fxhash` feature these are the Fx hashers' maps; without it they
//! fall back to the std hasher. Code should build them through [`new_map`] and
//! [`map_with_capacity`] so it compiles under either choice.

#[cfg(feature = "fxhash")]
pub type Map<K, V> = fxhash::FxHashMap<K, V>;
#[cfg(feature = "fxhash")]
pub type Set<T> = fxhash::FxHashSet<T>;

#[cfg(not(feature = "fxhash"))]
pub type Map<K, V> = std::collections::HashMap<K, V>;
#[cfg(not(feature = "fxhash"))]
pub type Set<T> = std::collections::HashSet<T>;

pub fn new_map<K, V>() -> Map<K, V> {
    Map::default()
}

pub fn map_with_capacity<K, V>(capacity: usize) -> Map<K, V> {
    Map::with_capacity_and_hasher(capacity, Default::default())
}

pub fn new_set<T>() -> Set<T> {
    Set::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_hash_map() {
        let mut m: Map<&str, u32> = map_with_capacity(4);
        m.insert("a", 1);
        *m.entry("a").or_insert(0) += 1;
        m.insert("b", 5);
        assert_eq!(m.get("a"), Some(&2));
        assert_eq!(m.len(), 2);

        let mut s: Set<u32> = new_set();
        assert!(s.insert(3));
        assert!(!s.insert(3));

        let empty: Map<u8, u8> = new_map();
        assert!(empty.is_empty());
    }
}
