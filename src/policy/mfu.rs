//! # Most Frequently Used (MFU) Eviction
//!
//! Evicts the entry with the highest use count. Same bookkeeping as
//! [`LfuPolicy`](crate::policy::LfuPolicy), inverted heap order:
//!
//! ```text
//!   LFU   min-first heap   root = lowest count   (keep the hot set)
//!   MFU   max-first heap   root = highest count  (shed the hot set)
//! ```
//!
//! MFU is counterintuitive for general caching. It helps when a high count
//! signals work that is finished, burst traffic that will not repeat, or a
//! scan that already passed. For temporal locality use
//! [`LruPolicy`](crate::policy::LruPolicy) instead.
//!
//! Ties on the highest count are unspecified, as in LFU.

use crate::ds::{IndexedHeap, SlotId};
use crate::policy::{EvictionPolicy, PolicyState};

/// Frequency-ordered eviction over a max-first indexed heap.
///
/// # Example
///
/// ```
/// use evictkit::cache::MfuCache;
///
/// let mut cache: MfuCache<u32, &str> = MfuCache::new(2);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.get(&1);
/// cache.get(&1);
/// cache.insert(3, "three");
///
/// assert!(!cache.contains(&1)); // hottest entry, evicted
/// assert!(cache.contains(&2));
/// ```
#[derive(Debug)]
pub struct MfuPolicy {
    uses: IndexedHeap<SlotId>,
}

impl MfuPolicy {
    pub fn new() -> Self {
        MfuPolicy {
            uses: IndexedHeap::max_first(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MfuPolicy {
            uses: IndexedHeap::with_capacity(crate::ds::HeapOrder::MaxFirst, capacity),
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

impl Default for MfuPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for MfuPolicy {
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
