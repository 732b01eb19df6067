use crate::cache::list::{Handle, RecencyList};
use crate::cache::Cache;
use crate::error::{CacheError, Result};
use ahash::RandomState;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Up-front slot reservation; larger caches grow on demand.
const MAX_PREALLOCATED: u64 = 1024;

/// A cached pair as stored in the recency list.
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

/// The inner data structure for the LRUCache.
struct LRUCacheInner<K, V> {
    capacity: u64,
    index: HashMap<K, Handle, RandomState>,
    list: RecencyList<Entry<K, V>>,
}

impl<K: Eq + Hash + Clone, V> LRUCacheInner<K, V> {
    /// Create a new LRUCacheInner with the given capacity, internally up to `MAX_PREALLOCATED` slots are reserved for the necessary data structures.
    fn new(capacity: u64) -> Self {
        let reserved = capacity.min(MAX_PREALLOCATED) as usize;
        LRUCacheInner {
            capacity,
            index: HashMap::with_capacity_and_hasher(reserved, RandomState::new()),
            list: RecencyList::with_capacity(reserved),
        }
    }

    fn get(&mut self, key: &K) -> Option<Arc<V>> {
        let handle = *self.index.get(key)?;
        self.list.move_to_front(handle);
        self.list.get(handle).map(|entry| Arc::clone(&entry.value))
    }

    fn set(&mut self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);

        if let Some(&handle) = self.index.get(&key) {
            // A write counts as a use.
            let previous = self
                .list
                .get_mut(handle)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            self.list.move_to_front(handle);
            return previous;
        }

        if self.list.len() as u64 >= self.capacity {
            self.evict();
        }
        let handle = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, handle);
        None
    }

    /// Detach the tail from the list, then drop its key from the index.
    fn evict(&mut self) {
        if let Some(evicted) = self.list.remove_last() {
            self.index.remove(&evicted.key);
            debug!(len = self.list.len(), capacity = self.capacity, "evicted least recently used entry");
        }
    }

    fn clear(&mut self) {
        debug!(dropped = self.list.len(), "clearing lru cache");
        self.index.clear();
        self.list.clear();
    }
}

/// LRUCache is a fixed-capacity cache that uses the Least Recently Used (LRU) algorithm to evict items.
///
/// Entries live in an arena-backed doubly linked list ordered by recency, and a hash index maps each key to its list handle, so `get` and `set` are O(1).
/// Every `get` hit and every `set` moves the entry to the front. When a new key arrives at capacity, the entry at the back is evicted first.
///
/// All mutability is handled internally with a Mutex, so the cache can be shared between threads. Values are returned as Arcs to allow for shared ownership.
///
/// Example:
/// ```
/// use memocache::{Cache, LRUCache};
///
/// let cache = LRUCache::<&str, String>::new(10).unwrap();
///
/// let original_value = cache.set("key", "value".to_string());
/// assert!(original_value.is_none());
///
/// let value = cache.get(&"key");
/// assert_eq!(*value.unwrap(), "value".to_string());
/// assert!(cache.get(&"missing").is_none());
/// ```
pub struct LRUCache<K, V> {
    inner: Mutex<LRUCacheInner<K, V>>,
}

impl<K: Eq + Hash + Clone + Send + Sync, V: Send + Sync> LRUCache<K, V> {
    /// Create a new LRUCache holding at most `capacity` entries.
    ///
    /// A capacity of zero is rejected with [`CacheError::InvalidCapacity`].
    pub fn new(capacity: u64) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        debug!(capacity, "creating lru cache");
        Ok(LRUCache {
            inner: Mutex::new(LRUCacheInner::new(capacity)),
        })
    }

    pub fn capacity(&self) -> u64 {
        self.inner.lock().capacity
    }

    /// Panics if the index and list disagree, the list links are broken, or capacity is exceeded.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        let inner = self.inner.lock();
        inner.list.debug_validate_links();
        assert_eq!(inner.index.len(), inner.list.len(), "index and list sizes differ");
        assert!(
            inner.list.len() as u64 <= inner.capacity,
            "len({}) > capacity({})",
            inner.list.len(),
            inner.capacity
        );
        for (key, &handle) in &inner.index {
            let entry = inner.list.get(handle).expect("index points at an empty slot");
            assert!(entry.key == *key, "index handle points at a different key");
        }
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        let inner = self.inner.lock();
        inner.list.iter().map(|entry| entry.key.clone()).collect()
    }
}

impl<K: Eq + Hash + Clone + Send + Sync, V: Send + Sync> Cache<K, V> for LRUCache<K, V> {
    /// Get a value from the cache, marking it most recently used.
    fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().get(key)
    }

    /// Set a value in the cache, evicting the least recently used entry if a new key would exceed capacity.
    fn set(&self, key: K, value: V) -> Option<Arc<V>> {
        self.inner.lock().set(key, value)
    }

    /// Clear the cache, removing all items.
    fn clear(&self) {
        self.inner.lock().clear();
    }

    fn len(&self) -> usize {
        self.inner.lock().list.len()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Get(u8),
        Set(u8, i32),
        Clear,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            8 => any::<u8>().prop_map(|k| Op::Get(k % 32)),
            8 => (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Set(k % 32, v)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        /// len() never exceeds capacity and the index always matches the list.
        #[test]
        fn prop_len_within_capacity(
            capacity in 1u64..16,
            ops in prop::collection::vec(op_strategy(), 0..200)
        ) {
            let cache = LRUCache::new(capacity).unwrap();
            for op in ops {
                match op {
                    Op::Get(k) => { cache.get(&k); }
                    Op::Set(k, v) => { cache.set(k, v); }
                    Op::Clear => cache.clear(),
                }
                prop_assert!(cache.len() as u64 <= capacity);
            }
            cache.debug_validate_invariants();
        }

        /// A set is immediately readable.
        #[test]
        fn prop_set_then_get(
            capacity in 1u64..16,
            prefix in prop::collection::vec((0u8..32, any::<i32>()), 0..50),
            key in 0u8..32,
            value in any::<i32>()
        ) {
            let cache = LRUCache::new(capacity).unwrap();
            for (k, v) in prefix {
                cache.set(k, v);
            }
            cache.set(key, value);
            prop_assert_eq!(cache.get(&key).map(|v| *v), Some(value));
        }

        /// Filling past capacity with fresh keys evicts exactly the oldest untouched one.
        #[test]
        fn prop_evicts_first_inserted(capacity in 1u64..32) {
            let cache = LRUCache::new(capacity).unwrap();
            for k in 0..=capacity {
                cache.set(k, k);
            }
            prop_assert!(cache.get(&0).is_none());
            for k in 1..=capacity {
                prop_assert_eq!(cache.get(&k).map(|v| *v), Some(k));
            }
        }

        /// The more recently accessed of two keys is never evicted first.
        #[test]
        fn prop_recency_order(
            capacity in 2u64..16,
            keys in prop::collection::hash_set(0u32..100, 2..16),
            pressure in 1usize..32
        ) {
            let cache = LRUCache::new(capacity).unwrap();
            let keys: Vec<u32> = keys.into_iter().take(capacity as usize).collect();
            for &k in &keys {
                cache.set(k, k);
            }
            let older = keys[0];
            let newer = keys[keys.len() - 1];
            cache.get(&older);
            cache.get(&newer);

            for i in 0..pressure {
                cache.set(1_000 + i as u32, 0);
                let older_present = cache.inner.lock().index.contains_key(&older);
                let newer_present = cache.inner.lock().index.contains_key(&newer);
                prop_assert!(newer_present || !older_present, "newer key evicted before older key");
            }
        }
    }
}
