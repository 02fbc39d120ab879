//! Indexed binary heap with stable handles and in-place re-weighting.
//!
//! The heap keeps its order in a flat `Vec<SlotId>` while the nodes
//! themselves live in a [`SlotArena`]. Each node records its live position in
//! the order vector, and every swap updates both nodes' recorded positions
//! together with the element swap. A caller holding a node's `SlotId` can
//! therefore re-weight it in O(log n) with no search, which is what the
//! frequency policies rely on.
//!
//! ```text
//!   heap (positions)          nodes (SlotArena)
//!   ┌───┬───┬───┬───┐         ┌──────┬─────────────────────────────┐
//!   │ 0 │ 1 │ 2 │ 3 │         │ id   │ { value, weight, pos }      │
//!   ├───┼───┼───┼───┤         ├──────┼─────────────────────────────┤
//!   │id2│id0│id3│id1│   ◄───► │ id0  │ { B, weight: 4, pos: 1 }    │
//!   └───┴───┴───┴───┘         │ id2  │ { A, weight: 1, pos: 0 }    │
//!     children of pos i       │ ...  │                             │
//!     at 2i+1 and 2i+2        └──────┴─────────────────────────────┘
//! ```
//!
//! [`HeapOrder`] selects which weight ranks first: `MinFirst` pops the
//! smallest weight (low-frequency eviction), `MaxFirst` the largest
//! (high-frequency eviction). Comparisons are strict, so equal weights never
//! swap and their relative order is whatever the sifts left behind.
//!
//! `touch` increments a weight and then sifts in the single direction the
//! increment can have violated: toward descendants under `MinFirst`, toward
//! ancestors under `MaxFirst`. `set_weight` makes no assumption and re-sifts
//! both ways.
//!
//! # Example
//!
//! ```
//! use evictkit::ds::{HeapOrder, IndexedHeap};
//!
//! let mut heap = IndexedHeap::new(HeapOrder::MinFirst);
//! let _a = heap.push("a", 3);
//! let b = heap.push("b", 1);
//! heap.touch(b); // weight 2, still the minimum
//! assert_eq!(heap.pop(), Some(("b", 2)));
//! assert_eq!(heap.pop(), Some(("a", 3)));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::ds::slot_arena::{SlotArena, SlotId};

/// Which end of the weight range ranks first (and pops first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    MinFirst,
    MaxFirst,
}

#[derive(Debug)]
struct HeapNode<T> {
    value: T,
    weight: u64,
    pos: usize,
}

#[derive(Debug)]
pub struct IndexedHeap<T> {
    nodes: SlotArena<HeapNode<T>>,
    heap: Vec<SlotId>,
    order: HeapOrder,
}

impl<T> IndexedHeap<T> {
    pub fn new(order: HeapOrder) -> Self {
        Self {
            nodes: SlotArena::new(),
            heap: Vec::new(),
            order,
        }
    }

    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            heap: Vec::with_capacity(capacity),
            order,
        }
    }

    /// Shorthand for [`IndexedHeap::new`] with [`HeapOrder::MinFirst`].
    pub fn min_first() -> Self {
        Self::new(HeapOrder::MinFirst)
    }

    /// Shorthand for [`IndexedHeap::new`] with [`HeapOrder::MaxFirst`].
    pub fn max_first() -> Self {
        Self::new(HeapOrder::MaxFirst)
    }

    #[inline]
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        self.nodes.contains(id)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    pub fn weight(&self, id: SlotId) -> Option<u64> {
        self.nodes.get(id).map(|node| node.weight)
    }

    /// Root value and weight without removing it.
    pub fn peek(&self) -> Option<(&T, u64)> {
        let node = &self.nodes[*self.heap.first()?];
        Some((&node.value, node.weight))
    }

    /// Inserts `value` with `weight`, sifts it into place, and returns its
    /// handle. The handle stays valid until the element is popped or removed.
    pub fn push(&mut self, value: T, weight: u64) -> SlotId {
        let pos = self.heap.len();
        let id = self.nodes.insert(HeapNode { value, weight, pos });
        self.heap.push(id);
        self.sift_up(pos);
        id
    }

    /// Removes and returns the best-ranked element (minimum weight under
    /// `MinFirst`, maximum under `MaxFirst`); `None` on an empty heap.
    pub fn pop(&mut self) -> Option<(T, u64)> {
        let last = self.heap.len().checked_sub(1)?;
        if last > 0 {
            self.swap_slots(0, last);
        }
        let id = self.heap.pop()?;
        let node = self.nodes.remove(id)?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((node.value, node.weight))
    }

    /// Increments the weight of the element at `id` and restores heap order,
    /// sifting only in the direction an increment can violate. Returns the
    /// new weight, or `None` if `id` is not a live element.
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let (pos, weight) = {
            let node = self.nodes.get_mut(id)?;
            node.weight = node.weight.saturating_add(1);
            (node.pos, node.weight)
        };
        match self.order {
            HeapOrder::MinFirst => self.sift_down(pos),
            HeapOrder::MaxFirst => self.sift_up(pos),
        }
        Some(weight)
    }

    /// Sets the weight of the element at `id` outright and re-sifts in both
    /// directions. Returns `false` if `id` is not a live element.
    pub fn set_weight(&mut self, id: SlotId, weight: u64) -> bool {
        let pos = match self.nodes.get_mut(id) {
            Some(node) => {
                node.weight = weight;
                node.pos
            }
            None => return false,
        };
        self.sift_up(pos);
        let pos = self.nodes[id].pos;
        self.sift_down(pos);
        true
    }

    /// Removes the element at `id` regardless of its rank.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let pos = self.nodes.get(id)?.pos;
        let last = self.heap.len() - 1;
        if pos != last {
            self.swap_slots(pos, last);
        }
        self.heap.pop();
        let node = self.nodes.remove(id)?;
        if pos < self.heap.len() {
            // The relocated element can be out of order either way.
            self.sift_up(pos);
            let moved = self.heap[pos];
            let new_pos = self.nodes[moved].pos;
            self.sift_down(new_pos);
        }
        Some(node.value)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.heap.clear();
    }

    /// Iterates live elements in arbitrary (heap array) order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u64)> {
        self.heap.iter().map(|&id| {
            let node = &self.nodes[id];
            (&node.value, node.weight)
        })
    }

    #[inline]
    fn ranks_before(&self, a: u64, b: u64) -> bool {
        match self.order {
            HeapOrder::MinFirst => a < b,
            HeapOrder::MaxFirst => a > b,
        }
    }

    #[inline]
    fn weight_at(&self, pos: usize) -> u64 {
        self.nodes[self.heap[pos]].weight
    }

    // Swaps two order-vector positions and both nodes' recorded positions.
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.nodes[self.heap[a]].pos = a;
        self.nodes[self.heap[b]].pos = b;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.ranks_before(self.weight_at(pos), self.weight_at(parent)) {
                break;
            }
            self.swap_slots(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let mut best = pos;
            let left = 2 * pos + 1;
            let right = left + 1;
            if left < len && self.ranks_before(self.weight_at(left), self.weight_at(best)) {
                best = left;
            }
            if right < len && self.ranks_before(self.weight_at(right), self.weight_at(best)) {
                best = right;
            }
            if best == pos {
                return;
            }
            self.swap_slots(pos, best);
            pos = best;
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.heap.len(), self.nodes.len(), "order/arena length mismatch");
        for (pos, &id) in self.heap.iter().enumerate() {
            let node = self.nodes.get(id).expect("ordered id must be live");
            assert_eq!(node.pos, pos, "recorded position out of sync at {pos}");
            if pos > 0 {
                let parent = self.weight_at((pos - 1) / 2);
                assert!(
                    !self.ranks_before(node.weight, parent),
                    "heap property violated at {pos}: child {} vs parent {parent}",
                    node.weight,
                );
            }
        }
    }
}
