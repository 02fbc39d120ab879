//! # Least Frequently Used (LFU) Eviction
//!
//! Evicts the entry with the lowest use count.
//!
//! ```text
//!   Access pattern: A, B, A, C, A   (capacity 3, then insert D)
//!
//!   use counts:  { A: 3, B: 1, C: 1 }
//!
//!   min-first heap:        (B, 1)        ← root, eviction candidate
//!                         /      \
//!                    (C, 1)     (A, 3)
//!
//!   insert(D): B or C goes (tie on count 1), never A.
//! ```
//!
//! Use counts live as weights in a min-first [`IndexedHeap`]; the heap root
//! is always an entry with the smallest count. A new entry starts at count 1
//! and every later `after_add` or `before_get` bumps it by one via
//! [`IndexedHeap::touch`], sinking the entry toward the leaves.
//!
//! Entries with equal counts rank by heap position, so eviction order within
//! a count is unspecified. Counts never decay; a once-hot entry keeps its
//! standing until it is removed.

use crate::ds::{IndexedHeap, SlotId};
use crate::policy::{EvictionPolicy, PolicyState};

/// Frequency-ordered eviction over a min-first indexed heap.
///
/// # Example
///
/// ```
/// use evictkit::cache::LfuCache;
///
/// let mut cache: LfuCache<u32, &str> = LfuCache::new(2);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.get(&1);
/// cache.get(&1);
/// cache.insert(3, "three");
///
/// assert!(cache.contains(&1));  // count 3, safe
/// assert!(!cache.contains(&2)); // count 1, evicted
/// ```
#[derive(Debug)]
pub struct LfuPolicy {
    uses: IndexedHeap<SlotId>,
}

impl LfuPolicy {
    pub fn new() -> Self {
        LfuPolicy {
            uses: IndexedHeap::min_first(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LfuPolicy {
            uses: IndexedHeap::with_capacity(crate::ds::HeapOrder::MinFirst, capacity),
        }
    }

    /// Use count of the tracked entry, `None` for an unlinked state.
    pub fn use_count(&self, state: &PolicyState) -> Option<u64> {
        self.uses.weight(state.frequency_handle()?)
    }

    fn record_use(&mut self, entry: SlotId, state: &mut PolicyState) {
        match state.frequency_handle() {
            Some(handle) => {
                self.uses.touch(handle);
            },
            None => *state = PolicyState::Frequency(self.uses.push(entry, 1)),
        }
    }
}

impl Default for LfuPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for LfuPolicy {
    fn after_add(&mut self, entry: SlotId, state: &mut PolicyState) {
        self.record_use(entry, state);
    }

    fn before_get(&mut self, entry: SlotId, state: &mut PolicyState) {
        self.record_use(entry, state);
    }

    fn evict(&mut self) -> Option<SlotId> {
        self.uses.pop().map(|(entry, _count)| entry)
    }

    fn detach(&mut self, state: &mut PolicyState) {
        if let Some(handle) = state.frequency_handle() {
            self.uses.remove(handle);
        }
        *state = PolicyState::Unlinked;
    }

    fn len(&self) -> usize {
        self.uses.len()
    }

    fn clear(&mut self) {
        self.uses.clear();
    }
}
