use std::hash::Hash;
use std::sync::Arc;

/// Cache trait defines the methods that a key/value cache should implement and provides a shared interface for different cache implementations
///
/// The cache trait is useful for defining generic memoized functions that can work with any cache implementation
/// Example:
/// ```
/// use memocache::{Cache, LRUCache, UnboundedCache};
///
/// fn do_something<C>(cache: C)
/// where
///     C: Cache<&'static str, String>,
/// {
///     cache.set("hello", "world".to_string());
///     if let Some(val) = cache.get(&"hello") {
///         println!("Got: {}", val);
///     }
/// }
///
/// fn main() {
///     // Both caches use &'static str for K and String for V
///     let lru_cache = LRUCache::<&'static str, String>::new(2).unwrap();
///     do_something(lru_cache);
///
///     let unbounded_cache = UnboundedCache::<&'static str, String>::new();
///     do_something(unbounded_cache);
/// }
/// ```
pub trait Cache<K: Eq + Hash + Clone + Send + Sync, V: Send + Sync>: Send + Sync {
    /// Look up a key, returning `None` when nothing is cached for it.
    fn get(&self, key: &K) -> Option<Arc<V>>;
    /// Store a value, returning the value it replaced.
    fn set(&self, key: K, value: V) -> Option<Arc<V>>;
    /// Drop every cached entry.
    fn clear(&self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

mod list;
pub mod lru;
pub mod splay;
pub mod unbounded;
