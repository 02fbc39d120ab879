//! Runtime policy selection behind one cache type.
//!
//! The policy generic on [`CacheCore`] is a compile-time choice. When the
//! policy comes from configuration instead, the builder erases it behind a
//! [`BoxedPolicy`] so every choice yields the same [`Cache<K, V>`] type.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

#[cfg(feature = "concurrency")]
use crate::cache::ConcurrentCache;
use crate::cache::CacheCore;
use crate::error::ConfigError;
use crate::policy::{EvictionPolicy, LfuPolicy, LruPolicy, MfuPolicy};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction.
    Lfu,
    /// Most Frequently Used eviction.
    Mfu,
}

impl CachePolicy {
    fn instantiate(self, capacity: usize) -> BoxedPolicy {
        match self {
            CachePolicy::Lru => Box::new(LruPolicy::with_capacity(capacity)),
            CachePolicy::Lfu => Box::new(LfuPolicy::with_capacity(capacity)),
            CachePolicy::Mfu => Box::new(MfuPolicy::with_capacity(capacity)),
        }
    }
}

/// A policy chosen at runtime, usable wherever a concrete policy is.
pub type BoxedPolicy = Box<dyn EvictionPolicy + Send>;

/// Cache whose eviction policy was picked at runtime.
pub type Cache<K, V> = CacheCore<K, V, BoxedPolicy>;

/// Builder tying a capacity to a policy choice.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Starts a builder for a cache of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a cache with the chosen policy.
    ///
    /// A capacity of 0 is accepted and yields a cache that retains nothing;
    /// use [`CacheBuilder::try_build`] to reject it instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let mfu = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Mfu);
    /// assert_eq!(lru.capacity(), mfu.capacity());
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        CacheCore::with_policy(self.capacity, policy.instantiate(self.capacity))
    }

    /// Builds a cache with the chosen policy, rejecting `capacity == 0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// assert!(CacheBuilder::new(0).try_build::<u64, u64>(CachePolicy::Lfu).is_err());
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        CacheCore::try_with_policy(self.capacity, policy.instantiate(self.capacity))
    }

    /// Builds a thread-safe cache with the chosen policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let cache = CacheBuilder::new(100).build_concurrent::<u64, String>(CachePolicy::Lfu);
    /// cache.insert(1, "hello".to_string());
    /// assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("hello"));
    /// ```
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self, policy: CachePolicy) -> ConcurrentCache<K, V, BoxedPolicy>
    where
        K: Eq + Hash + Clone + Send + Sync,
        V: Send + Sync,
    {
        ConcurrentCache::with_policy(self.capacity, policy.instantiate(self.capacity))
    }

    /// Fallible form of [`CacheBuilder::build_concurrent`].
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K, V>(
        self,
        policy: CachePolicy,
    ) -> Result<ConcurrentCache<K, V, BoxedPolicy>, ConfigError>
    where
        K: Eq + Hash + Clone + Send + Sync,
        V: Send + Sync,
    {
        ConcurrentCache::try_with_policy(self.capacity, policy.instantiate(self.capacity))
    }
}
