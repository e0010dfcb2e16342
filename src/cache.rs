//! Bounded LRU memoization for resolved images and detection results.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::hash::Hash;
use std::sync::Mutex;

/// A bounded, least-recently-used cache.
///
/// A single mutex guards the whole structure; with the small capacities used
/// here (32 entries) there is no need for finer-grained locking.
/// [`BoundedCache::get_or_compute`] holds that lock across the compute
/// closure, so at most one computation per cache is ever in flight —
/// concurrent requests for the same key never recompute redundantly.
///
/// Values are cloned out, never shared: callers own their copy and may
/// mutate it (the temporal matcher rewrites status fields) without touching
/// cached state.
pub struct BoundedCache<K, V> {
    inner: Mutex<CacheInner<K, V>>,
    capacity: usize,
}

struct CacheInner<K, V> {
    map: HashMap<K, V>,
    // Keys ordered least- to most-recently used.
    order: VecDeque<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries. A capacity of 0
    /// is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Returns a copy of the cached value, promoting the key to
    /// most-recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();
        let value = inner.map.get(key).cloned()?;
        Self::promote(&mut inner.order, key);
        Some(value)
    }

    /// Inserts a value, evicting the least-recently-used entry when full.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.lock();
        Self::insert(&mut inner, self.capacity, key, value);
    }

    /// Returns the cached value for `key`, or runs `compute` and caches its
    /// result. The internal lock is held for the duration of `compute`.
    pub fn get_or_compute<F>(&self, key: &K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut inner = self.lock();
        if let Some(value) = inner.map.get(key).cloned() {
            Self::promote(&mut inner.order, key);
            return value;
        }
        let value = compute();
        Self::insert(&mut inner, self.capacity, key.clone(), value.clone());
        value
    }

    /// Drops the entry for `key`, if present. Subsequent lookups recompute.
    pub fn invalidate(&self, key: &K) {
        let mut inner = self.lock();
        if inner.map.remove(key).is_some() {
            inner.order.retain(|k| k != key);
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner<K, V>> {
        // A poisoned lock only happens if a clone/compute panicked; the
        // cached data itself is still consistent.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn promote(order: &mut VecDeque<K>, key: &K) {
        if let Some(pos) = order.iter().position(|k| k == key) {
            order.remove(pos);
        }
        order.push_back(key.clone());
    }

    fn insert(inner: &mut CacheInner<K, V>, capacity: usize, key: K, value: V) {
        if inner.map.insert(key.clone(), value).is_none() && inner.map.len() > capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.map.remove(&evicted);
            }
        }
        Self::promote(&mut inner.order, &key);
    }
}
