//! Eviction policies and the contract they share with the cache container.
//!
//! A policy never owns entries. It owns one ordering structure (a recency
//! list or a frequency heap) whose nodes carry entry ids, and it records the
//! node handle for each entry in that entry's [`PolicyState`] slot. The
//! container drives the policy through three lifecycle hooks:
//!
//! | hook         | fired by the container | policy's job                      |
//! |--------------|------------------------|-----------------------------------|
//! | `after_add`  | every `insert`         | link a new entry, or re-rank it   |
//! | `before_get` | every `get` hit        | re-rank the entry                 |
//! | `evict`      | over-capacity `insert`, explicit `evict` | nominate a victim |
//!
//! `detach` covers the remaining path: an entry leaving the cache outside
//! eviction (`remove`, `clear`) must take its structural node with it so no
//! handle dangles.
//!
//! The trait is object-safe; [`crate::builder::CacheBuilder`] relies on
//! `Box<dyn EvictionPolicy + Send>` for runtime policy selection.

pub mod lfu;
pub mod lru;
pub mod mfu;

pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use mfu::MfuPolicy;

use std::fmt;

use crate::ds::SlotId;

/// Per-entry policy bookkeeping, stored inline in the entry.
///
/// Exactly one variant is live per entry: the handle of the policy's
/// structural node for it, or [`PolicyState::Unlinked`] before the policy has
/// seen the entry (and again once the node is gone).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyState {
    #[default]
    Unlinked,
    /// Node handle in a recency list.
    Recency(SlotId),
    /// Node handle in a frequency heap.
    Frequency(SlotId),
}

impl PolicyState {
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        matches!(self, PolicyState::Unlinked)
    }

    #[inline]
    pub fn recency_handle(&self) -> Option<SlotId> {
        match *self {
            PolicyState::Recency(handle) => Some(handle),
            _ => None,
        }
    }

    #[inline]
    pub fn frequency_handle(&self) -> Option<SlotId> {
        match *self {
            PolicyState::Frequency(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Strategy deciding which entry leaves a full cache and how accesses
/// reorder the candidates.
///
/// `entry` arguments are ids into the container's entry arena; policies
/// treat them as opaque payload. Hooks mutate `state` in place so the
/// container never needs a second lookup to find a policy's node.
pub trait EvictionPolicy: fmt::Debug {
    /// Called after an entry is inserted or re-inserted. Links the entry
    /// into the ordering structure on first sight, re-ranks it otherwise.
    fn after_add(&mut self, entry: SlotId, state: &mut PolicyState);

    /// Called on a lookup hit, before the value is returned.
    fn before_get(&mut self, entry: SlotId, state: &mut PolicyState);

    /// Removes and returns the id of the entry ranked for eviction;
    /// `None` when the policy tracks nothing.
    fn evict(&mut self) -> Option<SlotId>;

    /// Drops the structural node recorded in `state`, leaving it
    /// [`PolicyState::Unlinked`]. Used when an entry is removed without
    /// going through `evict`.
    fn detach(&mut self, state: &mut PolicyState);

    /// Number of entries currently tracked; always equals the container's
    /// entry count between operations.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets all tracked entries.
    fn clear(&mut self);
}

impl EvictionPolicy for Box<dyn EvictionPolicy + Send> {
    fn after_add(&mut self, entry: SlotId, state: &mut PolicyState) {
        (**self).after_add(entry, state);
    }

    fn before_get(&mut self, entry: SlotId, state: &mut PolicyState) {
        (**self).before_get(entry, state);
    }

    fn evict(&mut self) -> Option<SlotId> {
        (**self).evict()
    }

    fn detach(&mut self, state: &mut PolicyState) {
        (**self).detach(state);
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
