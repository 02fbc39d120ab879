//! # Least Recently Used (LRU) Eviction
//!
//! Evicts the entry that has gone longest without an access.
//!
//! ```text
//!   front (MRU)                              back (LRU)
//!   ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── eviction candidate
//!   │ id_3 │      │ id_1 │      │ id_2 │
//!   └──────┘      └──────┘      └──────┘
//!      ▲
//!      └── insert and get both land here
//! ```
//!
//! The policy keeps an [`OrderedList`] of entry ids. Every `after_add` and
//! `before_get` moves the touched entry to the front, so the back of the
//! list is always the least recently used entry and `evict` is a tail pop.
//!
//! LRU adapts fast to shifting working sets but a one-time scan can flush
//! the whole cache; see [`LfuPolicy`](crate::policy::LfuPolicy) when
//! frequency matters more than recency.

use crate::ds::{OrderedList, SlotId};
use crate::policy::{EvictionPolicy, PolicyState};

/// Recency-ordered eviction over an arena-backed list.
///
/// # Example
///
/// ```
/// use evictkit::cache::LruCache;
///
/// let mut cache: LruCache<u32, &str> = LruCache::new(2);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.get(&1);
/// cache.insert(3, "three");
///
/// assert!(cache.contains(&1));  // promoted by the get
/// assert!(!cache.contains(&2)); // least recently used, evicted
/// ```
#[derive(Debug, Default)]
pub struct LruPolicy {
    order: OrderedList<SlotId>,
}

impl LruPolicy {
    pub fn new() -> Self {
        LruPolicy {
            order: OrderedList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LruPolicy {
            order: OrderedList::with_capacity(capacity),
        }
    }

    /// Position of the tracked entry in recency order, 0 = most recent.
    ///
    /// Linear scan; intended for diagnostics and tests, not hot paths.
    pub fn recency_rank(&self, state: &PolicyState) -> Option<usize> {
        let handle = state.recency_handle()?;
        self.order.iter_ids().position(|id| id == handle)
    }

    fn promote(&mut self, entry: SlotId, state: &mut PolicyState) {
        match state.recency_handle() {
            Some(handle) => {
                self.order.move_to_front(handle);
            },
            None => *state = PolicyState::Recency(self.order.push_front(entry)),
        }
    }
}

impl EvictionPolicy for LruPolicy {
    fn after_add(&mut self, entry: SlotId, state: &mut PolicyState) {
        self.promote(entry, state);
    }

    fn before_get(&mut self, entry: SlotId, state: &mut PolicyState) {
        self.promote(entry, state);
    }

    fn evict(&mut self) -> Option<SlotId> {
        self.order.pop_back()
    }

    fn detach(&mut self, state: &mut PolicyState) {
        if let Some(handle) = state.recency_handle() {
            self.order.remove(handle);
        }
        *state = PolicyState::Unlinked;
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.order.clear();
    }
}
