use crate::cache::Cache;
use ahash::RandomState;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// UnboundedCache is a plain memo table that never evicts.
///
/// Without a capacity there is nothing to evict, so no recency order is kept. Use it where every computed value should stay cached, such as memoizing a recursion whose subproblems are all reused.
///
/// All mutability is handled internally with a Mutex, so the cache can be shared between threads. Values are returned as Arcs to allow for shared ownership.
///
/// Example:
/// ```
/// use memocache::{Cache, UnboundedCache};
///
/// let cache = UnboundedCache::new();
/// for i in 0..1000u64 {
///     cache.set(i, i * i);
/// }
/// assert_eq!(cache.len(), 1000);
/// assert_eq!(cache.get(&0).map(|v| *v), Some(0));
/// ```
pub struct UnboundedCache<K, V> {
    inner: Mutex<HashMap<K, Arc<V>, RandomState>>,
}

impl<K: Eq + Hash + Clone + Send + Sync, V: Send + Sync> Default for UnboundedCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone + Send + Sync, V: Send + Sync> UnboundedCache<K, V> {
    /// Create a new, empty UnboundedCache.
    pub fn new() -> Self {
        UnboundedCache {
            inner: Mutex::new(HashMap::with_hasher(RandomState::new())),
        }
    }
}

impl<K: Eq + Hash + Clone + Send + Sync, V: Send + Sync> Cache<K, V> for UnboundedCache<K, V> {
    fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().get(key).cloned()
    }

    fn set(&self, key: K, value: V) -> Option<Arc<V>> {
        self.inner.lock().insert(key, Arc::new(value))
    }

    fn clear(&self) {
        let mut inner = self.inner.lock();
        debug!(dropped = inner.len(), "clearing unbounded cache");
        inner.clear();
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}
