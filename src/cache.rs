//! # Capacity-Bounded Cache Container
//!
//! [`CacheCore`] owns the entries and enforces the capacity bound; an
//! [`EvictionPolicy`] plugged in as the `P` parameter decides which entry
//! leaves when the bound is hit.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                       CacheCore<K, V, P>                         │
//!   │                                                                  │
//!   │   ┌──────────────────────┐       ┌──────────────────────────┐    │
//!   │   │ index                │       │ entries                  │    │
//!   │   │ FxHashMap<K, SlotId> │       │ SlotArena<Entry<K, V>>   │    │
//!   │   │                      │       │                          │    │
//!   │   │  "a" ─────────────────────►  │ slot 0: key, value,      │    │
//!   │   │  "b" ─────────────────────►  │         state ───┐       │    │
//!   │   │                      │       │ slot 1: ...      │       │    │
//!   │   └──────────────────────┘       └──────────────────┼───────┘    │
//!   │                                                     │            │
//!   │   ┌─────────────────────────────────────────────────▼────────┐   │
//!   │   │ policy: P                                                │   │
//!   │   │ recency list or frequency heap holding entry SlotIds;    │   │
//!   │   │ each entry's PolicyState stores its node handle          │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert Flow
//!
//! ```text
//!   insert(k, v)
//!        │
//!        ▼
//!   key present? ──── yes ──► replace value, after_add re-ranks,
//!        │                    return the previous value
//!        │ no
//!        ▼
//!   add entry to arena, index the key, after_add links the entry
//!        │
//!        ▼
//!   len > capacity? ── yes ──► policy.evict() names a victim,
//!        │                     drop it from arena and index
//!        ▼
//!   return None
//! ```
//!
//! `after_add` fires on every insert, new or update, and `before_get` fires
//! on every hit, so both paths count as a use under frequency policies and
//! as a touch under recency policies. [`CacheCore::peek`] and
//! [`CacheCore::contains`] bypass the policy entirely.
//!
//! ## Provided Shapes
//!
//! | Type                                | Policy            | Evicts            |
//! |-------------------------------------|-------------------|-------------------|
//! | [`LruCache<K, V>`]                  | [`LruPolicy`]     | least recent use  |
//! | [`LfuCache<K, V>`]                  | [`LfuPolicy`]     | lowest use count  |
//! | [`MfuCache<K, V>`]                  | [`MfuPolicy`]     | highest use count |
//! | [`ConcurrentCache<K, V, P>`]        | any               | per policy        |
//!
//! Runtime policy selection goes through
//! [`CacheBuilder`](crate::builder::CacheBuilder).
//!
//! ## Thread Safety
//!
//! - [`CacheCore`] is single-threaded; every operation takes `&mut self`
//!   or leaves the structure untouched.
//! - [`ConcurrentCache`] wraps the core in `Arc<parking_lot::Mutex>`. One
//!   exclusive lock covers every operation, including reads, because even a
//!   `get` re-ranks the entry. Values come back as `Arc<V>` clones so no
//!   borrow of the locked core escapes the critical section.

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::{SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::policy::{EvictionPolicy, LfuPolicy, LruPolicy, MfuPolicy, PolicyState};

/// A cached pair plus the policy's per-entry bookkeeping slot.
///
/// The key is duplicated here so eviction can clean the index without a
/// reverse lookup.
struct Entry<K, V> {
    key: K,
    value: V,
    state: PolicyState,
}

/// Single-threaded cache core generic over its eviction policy.
///
/// Entries live in a [`SlotArena`]; the index maps keys to arena slots; the
/// policy ranks slots for eviction. `len() <= capacity()` holds between
/// operations.
///
/// # Example
///
/// ```
/// use evictkit::cache::LruCache;
///
/// let mut cache: LruCache<u32, String> = LruCache::new(2);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// assert_eq!(cache.len(), 2);
/// assert!(!cache.contains(&1)); // oldest entry made room
/// ```
pub struct CacheCore<K, V, P> {
    entries: SlotArena<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    policy: P,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

/// Cache evicting the least recently used entry.
pub type LruCache<K, V> = CacheCore<K, V, LruPolicy>;

/// Cache evicting the entry with the lowest use count.
pub type LfuCache<K, V> = CacheCore<K, V, LfuPolicy>;

/// Cache evicting the entry with the highest use count.
pub type MfuCache<K, V> = CacheCore<K, V, MfuPolicy>;

impl<K, V, P> CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy + Default,
{
    /// Creates a cache with the given capacity and a default-constructed
    /// policy.
    ///
    /// A capacity of 0 is accepted and yields a cache that retains nothing:
    /// every insert is evicted on the spot. Use [`CacheCore::try_new`] to
    /// treat that as an error instead.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LfuCache;
    ///
    /// let cache: LfuCache<u32, String> = LfuCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, P::default())
    }

    /// Creates a cache with the given capacity, rejecting `capacity == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LruCache;
    ///
    /// assert!(LruCache::<u32, String>::try_new(0).is_err());
    /// let cache = LruCache::<u32, String>::try_new(8).unwrap();
    /// assert_eq!(cache.capacity(), 8);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_policy(capacity, P::default())
    }
}

impl<K, V, P> CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy,
{
    /// Creates a cache with the given capacity and an explicit policy
    /// instance.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::CacheCore;
    /// use evictkit::policy::LruPolicy;
    ///
    /// let mut cache = CacheCore::with_policy(8, LruPolicy::with_capacity(8));
    /// cache.insert("a", 1);
    /// assert_eq!(cache.get(&"a"), Some(&1));
    /// ```
    pub fn with_policy(capacity: usize, policy: P) -> Self {
        CacheCore {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            policy,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Fallible form of [`CacheCore::with_policy`]; rejects `capacity == 0`.
    pub fn try_with_policy(capacity: usize, policy: P) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be at least 1"));
        }
        Ok(Self::with_policy(capacity, policy))
    }

    /// Inserts or updates a key, returning the previous value on update.
    ///
    /// Both paths notify the policy, so an update counts as a use. A new
    /// entry that pushes `len()` past the capacity triggers eviction before
    /// the call returns.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LruCache;
    ///
    /// let mut cache: LruCache<u32, &str> = LruCache::new(4);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let entry = &mut self.entries[id];
            let previous = std::mem::replace(&mut entry.value, value);
            self.policy.after_add(id, &mut entry.state);

            self.debug_validate_counts();
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.entries.insert(Entry {
            key: key.clone(),
            value,
            state: PolicyState::default(),
        });
        self.index.insert(key, id);
        let entry = &mut self.entries[id];
        self.policy.after_add(id, &mut entry.state);

        while self.entries.len() > self.capacity {
            if self.evict_victim().is_none() {
                break;
            }
        }

        self.debug_validate_counts();
        None
    }

    /// Looks a key up and marks the entry as used.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LruCache;
    ///
    /// let mut cache: LruCache<u32, String> = LruCache::new(4);
    /// cache.insert(1, "value".to_string());
    ///
    /// assert_eq!(cache.get(&1).map(String::as_str), Some("value"));
    /// assert_eq!(cache.get(&2), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        let entry = &mut self.entries[id];
        self.policy.before_get(id, &mut entry.state);
        Some(&entry.value)
    }

    /// Looks a key up without telling the policy.
    ///
    /// The entry's standing is unchanged: under LRU it stays where it was,
    /// under LFU/MFU its count does not move.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LruCache;
    ///
    /// let mut cache: LruCache<u32, &str> = LruCache::new(2);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    ///
    /// cache.peek(&1); // does not refresh entry 1
    /// cache.insert(3, "three");
    /// assert!(!cache.contains(&1)); // still the eviction victim
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = *self.index.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_hit();

        Some(&self.entries[id].value)
    }

    /// Returns `true` if the key is cached. Never reorders.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_contains_call();

        self.index.contains_key(key)
    }

    /// Removes a key, returning its value. The policy drops its node for
    /// the entry.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LfuCache;
    ///
    /// let mut cache: LfuCache<u32, &str> = LfuCache::new(4);
    /// cache.insert(1, "one");
    ///
    /// assert_eq!(cache.remove(&1), Some("one"));
    /// assert_eq!(cache.remove(&1), None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let mut entry = self.entries.remove(id)?;
        self.policy.detach(&mut entry.state);

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        self.debug_validate_counts();
        Some(entry.value)
    }

    /// Removes and returns the entry the policy ranks for eviction.
    ///
    /// `None` on an empty cache. Among equally ranked entries the choice is
    /// unspecified.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::LruCache;
    ///
    /// let mut cache: LruCache<u32, &str> = LruCache::new(4);
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    ///
    /// assert_eq!(cache.evict(), Some((1, "one")));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn evict(&mut self) -> Option<(K, V)> {
        let evicted = self.evict_victim();
        self.debug_validate_counts();
        evicted
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries the cache retains.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read access to the policy, for policy-specific introspection.
    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.policy.clear();
        self.debug_validate_counts();
    }

    /// Full structural audit, `Err` describing the first violation found.
    ///
    /// Walks both directions: every indexed key must resolve to a live
    /// arena entry holding that key, and every arena entry must be indexed
    /// under its own key and linked into the policy. O(len), meant for
    /// tests and debugging sessions rather than hot paths.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but the arena holds {} entries",
                self.index.len(),
                self.entries.len()
            )));
        }
        if self.policy.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "policy tracks {} entries but the arena holds {}",
                self.policy.len(),
                self.entries.len()
            )));
        }
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            let entry = self.entries.get(id).ok_or_else(|| {
                InvariantError::new(format!("index points at vacant slot {}", id.index()))
            })?;
            if entry.key != *key {
                return Err(InvariantError::new(format!(
                    "index key does not match the key stored in slot {}",
                    id.index()
                )));
            }
        }
        for (id, entry) in self.entries.iter() {
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "entry in slot {} is not indexed under its own key",
                    id.index()
                )));
            }
            if entry.state.is_unlinked() {
                return Err(InvariantError::new(format!(
                    "entry in slot {} is not linked into the policy",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn evict_victim(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let id = self.policy.evict()?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        Some((entry.key, entry.value))
    }

    /// O(1) count agreement checks, active in debug builds only.
    #[inline]
    fn debug_validate_counts(&self) {
        debug_assert_eq!(self.entries.len(), self.index.len());
        debug_assert_eq!(self.entries.len(), self.policy.len());
        debug_assert!(self.entries.len() <= self.capacity);
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P> CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy,
{
    /// Copies the current counters plus len/capacity gauges.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_hits: self.metrics.peek_hits.get(),
            contains_calls: self.metrics.contains_calls.get(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V, P> fmt::Debug for CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<K, V, P> Default for CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy + Default,
{
    /// Creates a cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V, P> Extend<(K, V)> for CacheCore<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe cache sharing one [`CacheCore`] behind a single mutex.
///
/// Every operation, reads included, takes the one exclusive lock; a `get`
/// re-ranks the entry, so there is no read-only fast path. Critical
/// sections stay short because values are stored as `Arc<V>` and handed out
/// as clones; nothing heavier than pointer bumps happens under the lock.
///
/// Cloning the wrapper clones the `Arc` handle, not the cache.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use evictkit::cache::ConcurrentLruCache;
///
/// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
/// let writer = cache.clone();
///
/// let handle = thread::spawn(move || {
///     writer.insert(1, "from the other thread".to_string());
/// });
/// handle.join().unwrap();
///
/// assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("from the other thread"));
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentCache<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy,
{
    inner: Arc<Mutex<CacheCore<K, Arc<V>, P>>>,
}

/// Thread-safe LRU cache.
#[cfg(feature = "concurrency")]
pub type ConcurrentLruCache<K, V> = ConcurrentCache<K, V, LruPolicy>;

/// Thread-safe LFU cache.
#[cfg(feature = "concurrency")]
pub type ConcurrentLfuCache<K, V> = ConcurrentCache<K, V, LfuPolicy>;

/// Thread-safe MFU cache.
#[cfg(feature = "concurrency")]
pub type ConcurrentMfuCache<K, V> = ConcurrentCache<K, V, MfuPolicy>;

#[cfg(feature = "concurrency")]
impl<K, V, P> Clone for ConcurrentCache<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy,
{
    fn clone(&self) -> Self {
        ConcurrentCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, P> fmt::Debug for ConcurrentCache<K, V, P>
where
    K: Eq + Hash + Clone,
    P: EvictionPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .field("policy", &cache.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, P> Default for ConcurrentCache<K, V, P>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
    P: EvictionPolicy + Default + Send,
{
    /// Creates a concurrent cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, P> ConcurrentCache<K, V, P>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
    P: EvictionPolicy + Default + Send,
{
    /// Creates a concurrent cache with a default-constructed policy.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::ConcurrentLfuCache;
    ///
    /// let cache: ConcurrentLfuCache<u32, String> = ConcurrentLfuCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, P::default())
    }

    /// Fallible form of [`ConcurrentCache::new`]; rejects `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_policy(capacity, P::default())
    }
}

#[cfg(feature = "concurrency")]
impl<K, V, P> ConcurrentCache<K, V, P>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
    P: EvictionPolicy + Send,
{
    /// Creates a concurrent cache around an explicit policy instance.
    pub fn with_policy(capacity: usize, policy: P) -> Self {
        ConcurrentCache {
            inner: Arc::new(Mutex::new(CacheCore::with_policy(capacity, policy))),
        }
    }

    /// Fallible form of [`ConcurrentCache::with_policy`].
    pub fn try_with_policy(capacity: usize, policy: P) -> Result<Self, ConfigError> {
        Ok(ConcurrentCache {
            inner: Arc::new(Mutex::new(CacheCore::try_with_policy(capacity, policy)?)),
        })
    }

    /// Inserts a value, wrapping it in `Arc<V>`.
    ///
    /// Returns the previous `Arc<V>` if the key existed. The wrapping
    /// allocation happens before the lock is taken.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    ///
    /// assert!(cache.insert(1, "first".to_string()).is_none());
    /// let old = cache.insert(1, "updated".to_string());
    /// assert_eq!(*old.unwrap(), "first");
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        let mut cache = self.inner.lock();
        cache.insert(key, value)
    }

    /// Inserts an already wrapped `Arc<V>` without re-wrapping.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use evictkit::cache::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// let shared = Arc::new("shared".to_string());
    /// cache.insert_arc(1, Arc::clone(&shared));
    ///
    /// assert!(Arc::ptr_eq(&shared, &cache.get(&1).unwrap()));
    /// ```
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let mut cache = self.inner.lock();
        cache.insert(key, value)
    }

    /// Looks a key up, marking the entry as used.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// cache.insert(1, "value".to_string());
    ///
    /// assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("value"));
    /// assert!(cache.get(&999).is_none());
    /// ```
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.lock();
        cache.get(key).map(Arc::clone)
    }

    /// Looks a key up without telling the policy.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.lock();
        cache.peek(key).map(Arc::clone)
    }

    /// Removes a key, returning its value.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.lock();
        cache.remove(key)
    }

    /// Removes and returns the entry the policy ranks for eviction.
    pub fn evict(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.lock();
        cache.evict()
    }

    /// Returns `true` if the key is cached. Never reorders.
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.lock();
        cache.contains(key)
    }

    pub fn len(&self) -> usize {
        let cache = self.inner.lock();
        cache.len()
    }

    pub fn is_empty(&self) -> bool {
        let cache = self.inner.lock();
        cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        let cache = self.inner.lock();
        cache.capacity()
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&self) {
        let mut cache = self.inner.lock();
        cache.clear()
    }

    /// Runs [`CacheCore::check_invariants`] under the lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let cache = self.inner.lock();
        cache.check_invariants()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<K, V, P> ConcurrentCache<K, V, P>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
    P: EvictionPolicy + Send,
{
    /// Copies the current counters plus len/capacity gauges.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let cache = self.inner.lock();
        cache.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn new_cache_starts_empty() {
            let cache: LruCache<u32, u32> = LruCache::new(4);
            assert_eq!(cache.len(), 0);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 4);
        }

        #[test]
        fn try_new_rejects_zero_capacity() {
            let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
            assert!(err.message().contains("capacity"));
            assert!(LfuCache::<u32, u32>::try_new(0).is_err());
            assert!(MfuCache::<u32, u32>::try_new(0).is_err());
        }

        #[test]
        fn try_new_accepts_positive_capacity() {
            let cache = LfuCache::<u32, u32>::try_new(3).unwrap();
            assert_eq!(cache.capacity(), 3);
        }

        #[test]
        fn zero_capacity_cache_retains_nothing() {
            let mut cache: LruCache<u32, u32> = LruCache::new(0);

            assert_eq!(cache.insert(1, 10), None);
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.get(&1), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn default_capacity_is_sixteen() {
            let cache: LruCache<u32, u32> = LruCache::default();
            assert_eq!(cache.capacity(), 16);
        }

        #[test]
        fn with_policy_uses_the_given_instance() {
            let mut cache = CacheCore::with_policy(2, LruPolicy::with_capacity(2));
            cache.insert(1u32, "a");
            cache.insert(2, "b");
            cache.insert(3, "c");
            assert!(!cache.contains(&1));
        }
    }

    mod shared_behavior {
        use super::*;

        #[test]
        fn insert_returns_previous_value_on_update() {
            let mut cache: LruCache<u32, &str> = LruCache::new(4);

            assert_eq!(cache.insert(1, "first"), None);
            assert_eq!(cache.insert(1, "second"), Some("first"));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&1), Some(&"second"));
        }

        #[test]
        fn update_never_triggers_eviction() {
            let mut cache: LruCache<u32, u32> = LruCache::new(2);
            cache.insert(1, 10);
            cache.insert(2, 20);

            cache.insert(1, 11);

            assert_eq!(cache.len(), 2);
            assert!(cache.contains(&1));
            assert!(cache.contains(&2));
        }

        #[test]
        fn get_misses_return_none() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(4);
            cache.insert(1, 10);
            assert_eq!(cache.get(&2), None);
        }

        #[test]
        fn remove_returns_value_and_shrinks() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(4);
            cache.insert(1, 10);
            cache.insert(2, 20);

            assert_eq!(cache.remove(&1), Some(10));
            assert_eq!(cache.len(), 1);
            assert!(!cache.contains(&1));
            assert_eq!(cache.remove(&1), None);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn removed_key_can_be_reinserted() {
            let mut cache: MfuCache<u32, u32> = MfuCache::new(4);
            cache.insert(1, 10);
            cache.remove(&1);

            assert_eq!(cache.insert(1, 11), None, "stale state must not linger");
            assert_eq!(cache.get(&1), Some(&11));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn evict_on_empty_cache_returns_none() {
            let mut cache: LruCache<u32, u32> = LruCache::new(4);
            assert_eq!(cache.evict(), None);
        }

        #[test]
        fn evict_returns_key_and_value() {
            let mut cache: LruCache<u32, &str> = LruCache::new(4);
            cache.insert(1, "one");
            cache.insert(2, "two");

            assert_eq!(cache.evict(), Some((1, "one")));
            assert_eq!(cache.len(), 1);
            assert!(!cache.contains(&1));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn clear_empties_everything() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(4);
            for i in 0..4 {
                cache.insert(i, i);
            }

            cache.clear();

            assert!(cache.is_empty());
            assert_eq!(cache.get(&0), None);
            assert_eq!(cache.capacity(), 4);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn len_never_exceeds_capacity_under_churn() {
            let mut cache: LruCache<u32, u32> = LruCache::new(8);
            for i in 0..100 {
                cache.insert(i % 13, i);
                assert!(cache.len() <= cache.capacity());
                if i % 7 == 0 {
                    cache.get(&(i % 13));
                }
                if i % 11 == 0 {
                    cache.remove(&((i + 1) % 13));
                }
            }
            cache.check_invariants().unwrap();
        }

        #[test]
        fn extend_inserts_all_pairs() {
            let mut cache: LruCache<u32, u32> = LruCache::new(10);
            cache.extend((0..5).map(|i| (i, i * 10)));

            assert_eq!(cache.len(), 5);
            assert_eq!(cache.peek(&3), Some(&30));
        }

        #[test]
        fn debug_output_reports_shape() {
            let cache: LruCache<u32, u32> = LruCache::new(4);
            let rendered = format!("{cache:?}");
            assert!(rendered.contains("len"));
            assert!(rendered.contains("capacity"));
        }
    }

    mod lru_behavior {
        use super::*;

        #[test]
        fn evicts_least_recently_used() {
            let mut cache: LruCache<u32, u32> = LruCache::new(2);
            cache.insert(1, 100);
            cache.insert(2, 200);

            cache.insert(3, 300);

            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
        }

        #[test]
        fn get_refreshes_recency() {
            let mut cache: LruCache<u32, u32> = LruCache::new(3);
            cache.insert(1, 100);
            cache.insert(2, 200);
            cache.insert(3, 300);

            cache.get(&1);
            cache.insert(4, 400);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }

        #[test]
        fn update_refreshes_recency() {
            let mut cache: LruCache<u32, u32> = LruCache::new(3);
            cache.insert(1, 100);
            cache.insert(2, 200);
            cache.insert(3, 300);

            cache.insert(1, 101);
            cache.insert(4, 400);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
        }

        #[test]
        fn peek_and_contains_do_not_refresh() {
            let mut cache: LruCache<u32, u32> = LruCache::new(2);
            cache.insert(1, 100);
            cache.insert(2, 200);

            assert_eq!(cache.peek(&1), Some(&100));
            assert!(cache.contains(&1));
            cache.insert(3, 300);

            assert!(!cache.contains(&1), "peek/contains must not promote");
        }

        #[test]
        fn eviction_order_follows_recency() {
            let mut cache: LruCache<u32, u32> = LruCache::new(3);
            cache.insert(1, 100);
            cache.insert(2, 200);
            cache.get(&1);

            assert_eq!(cache.policy().len(), 2);
            assert_eq!(cache.evict().map(|(k, _)| k), Some(2));
            assert_eq!(cache.evict().map(|(k, _)| k), Some(1));
        }
    }

    mod lfu_behavior {
        use super::*;

        #[test]
        fn evicts_least_frequently_used() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(2);
            cache.insert(1, 100);
            cache.insert(2, 200);
            cache.get(&1);
            cache.get(&1);

            cache.insert(3, 300);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            assert!(cache.contains(&3));
        }

        #[test]
        fn new_entry_is_the_coldest() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(2);
            cache.insert(1, 100);
            cache.get(&1);
            cache.insert(2, 200);
            cache.get(&2);

            // 3 arrives with count 1 and immediately displaces nothing else
            cache.insert(3, 300);

            assert!(cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(!cache.contains(&3));
        }

        #[test]
        fn hot_entry_survives_a_scan() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(4);
            cache.insert(0, 0);
            for _ in 0..10 {
                cache.get(&0);
            }

            for i in 1..50 {
                cache.insert(i, i);
            }

            assert!(cache.contains(&0), "hot entry must outlive one-shot keys");
            assert_eq!(cache.len(), 4);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn update_counts_as_a_use() {
            let mut cache: LfuCache<u32, u32> = LfuCache::new(4);
            cache.insert(1, 100);
            cache.insert(2, 200);
            cache.insert(1, 101); // count of key 1 rises to 2

            assert_eq!(cache.evict().map(|(k, _)| k), Some(2));
            assert!(cache.contains(&1));
        }
    }

    mod mfu_behavior {
        use super::*;

        #[test]
        fn evicts_most_frequently_used() {
            let mut cache: MfuCache<u32, u32> = MfuCache::new(3);
            cache.insert(1, 100);
            cache.insert(2, 200);
            cache.insert(3, 300);
            for _ in 0..10 {
                cache.get(&1);
            }
            cache.get(&2);

            cache.insert(4, 400);

            assert!(!cache.contains(&1), "hottest entry leaves first");
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
            assert!(cache.contains(&4));
        }

        #[test]
        fn cold_entries_survive() {
            let mut cache: MfuCache<u32, u32> = MfuCache::new(2);
            cache.insert(1, 100);
            cache.insert(2, 200);
            cache.get(&2);

            cache.insert(3, 300);

            assert!(cache.contains(&1));
            assert!(!cache.contains(&2));
            assert!(cache.contains(&3));
            cache.check_invariants().unwrap();
        }
    }

    #[cfg(feature = "concurrency")]
    mod concurrent {
        use super::*;

        #[test]
        fn insert_get_roundtrip_through_arc() {
            let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(4);

            assert!(cache.insert(1, "one".to_string()).is_none());
            let value = cache.get(&1).unwrap();
            assert_eq!(value.as_str(), "one");
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn insert_arc_shares_the_instance() {
            let cache: ConcurrentLfuCache<u32, Vec<u8>> = ConcurrentLfuCache::new(4);
            let shared = Arc::new(vec![1, 2, 3]);

            cache.insert_arc(1, Arc::clone(&shared));

            assert!(Arc::ptr_eq(&shared, &cache.get(&1).unwrap()));
        }

        #[test]
        fn clone_shares_the_same_cache() {
            let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::new(4);
            let other = cache.clone();

            cache.insert(1, 10);

            assert_eq!(other.get(&1).as_deref(), Some(&10));
            other.clear();
            assert!(cache.is_empty());
        }

        #[test]
        fn eviction_applies_under_the_wrapper() {
            let cache: ConcurrentMfuCache<u32, u32> = ConcurrentMfuCache::new(2);
            cache.insert(1, 10);
            cache.insert(2, 20);
            cache.get(&1);
            cache.get(&1);

            cache.insert(3, 30);

            assert!(!cache.contains(&1));
            assert_eq!(cache.len(), 2);
            cache.check_invariants().unwrap();
        }

        #[test]
        fn peek_remove_and_evict_pass_through() {
            let cache: ConcurrentLruCache<u32, u32> = ConcurrentLruCache::new(4);
            cache.insert(1, 10);
            cache.insert(2, 20);

            assert_eq!(cache.peek(&1).as_deref(), Some(&10));
            assert_eq!(cache.remove(&2).as_deref(), Some(&20));
            let (key, value) = cache.evict().unwrap();
            assert_eq!((key, *value), (1, 10));
            assert!(cache.is_empty());
        }

        #[test]
        fn try_new_rejects_zero_capacity() {
            assert!(ConcurrentLruCache::<u32, u32>::try_new(0).is_err());
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counters_track_hits_and_misses() {
            let mut cache: LruCache<u32, u32> = LruCache::new(2);
            cache.insert(1, 10);
            cache.insert(2, 20);
            cache.insert(2, 21);
            cache.get(&1);
            cache.get(&99);
            cache.peek(&1);
            cache.peek(&98);
            cache.contains(&1);
            cache.insert(3, 30); // evicts one entry
            cache.remove(&97);

            let snapshot = cache.metrics_snapshot();
            assert_eq!(snapshot.insert_calls, 4);
            assert_eq!(snapshot.insert_new, 3);
            assert_eq!(snapshot.insert_updates, 1);
            assert_eq!(snapshot.get_calls, 2);
            assert_eq!(snapshot.get_hits, 1);
            assert_eq!(snapshot.get_misses, 1);
            assert_eq!(snapshot.peek_calls, 2);
            assert_eq!(snapshot.peek_hits, 1);
            assert_eq!(snapshot.contains_calls, 1);
            assert_eq!(snapshot.evicted_entries, 1);
            assert_eq!(snapshot.remove_calls, 1);
            assert_eq!(snapshot.remove_found, 0);
            assert_eq!(snapshot.cache_len, 2);
            assert_eq!(snapshot.capacity, 2);
        }
    }
}
