//! Operation counters for the cache container, behind the `metrics` feature.
//!
//! Counters come in two kinds. Operations taking `&mut self` on the cache
//! bump plain `u64` fields; read-only operations (`peek`, `contains`) go
//! through [`MetricsCell`] so they stay `&self` on the cache side.
//! [`CacheMetricsSnapshot`] is the plain-data copy handed to callers.

use std::cell::Cell;

/// A metrics-only cell.
///
/// # Safety
/// This type is only safe if all accesses are externally synchronized.
/// In this system, it is protected by the cache's exclusive lock (or by
/// `&mut` access) at a higher level.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// SAFETY:
// All access to MetricsCell is externally synchronized by the cache's lock.
// Metrics are observational and do not affect correctness.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}

/// Live counters owned by the cache container.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub peek_calls: MetricsCell,
    pub peek_hits: MetricsCell,
    pub contains_calls: MetricsCell,
}

impl CacheMetrics {
    pub fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    pub fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    pub fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    pub fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    pub fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    pub fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    pub fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    pub fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    pub fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    pub fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    pub fn record_peek_hit(&self) {
        self.peek_hits.incr();
    }

    pub fn record_contains_call(&self) {
        self.contains_calls.incr();
    }
}

/// Counters copied out of a cache at one point in time.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,

    pub peek_calls: u64,
    pub peek_hits: u64,
    pub contains_calls: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}
