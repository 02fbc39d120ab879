//! Doubly linked recency list backed by [`SlotArena`].
//!
//! Nodes live in an arena and link to each other by [`SlotId`], so callers
//! hold stable handles instead of references and every splice is O(1) with no
//! allocation. The front of the list is the most recently touched end; the
//! back is the candidate for recency eviction.
//!
//! ```text
//!   head ─► [id_2] ◄──► [id_0] ◄──► [id_1] ◄─ tail
//!            front                   back
//! ```
//!
//! - `push_front` / `move_to_front` / `remove` / `pop_back`: O(1)
//! - `at(i)`: O(n/2), walks from whichever end is closer; diagnostics only
//!
//! `debug_validate_invariants()` walks the chain in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug)]
pub struct OrderedList<T> {
    nodes: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> OrderedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: SlotId) -> bool {
        self.nodes.contains(id)
    }

    /// Value at the front (most recently touched), if any.
    pub fn front(&self) -> Option<&T> {
        Some(&self.nodes[self.head?].value)
    }

    /// Value at the back (least recently touched), if any.
    pub fn back(&self) -> Option<&T> {
        Some(&self.nodes[self.tail?].value)
    }

    #[inline]
    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    #[inline]
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.nodes.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Moves an existing node to the front; no-op if it already is the head.
    /// Returns `false` if `id` is not a live node.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.nodes.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        let old_head = self.head;
        {
            let node = &mut self.nodes[id];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.nodes[old_head].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        true
    }

    /// Removes and returns the back value; `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks the node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.nodes.contains(id) {
            return None;
        }
        self.detach(id);
        self.nodes.remove(id).map(|node| node.value)
    }

    /// Handle of the `index`-th node from the front, walking from whichever
    /// end is closer. Intended for diagnostics and tests, not hot paths.
    pub fn at(&self, index: usize) -> Option<SlotId> {
        let len = self.len();
        if index >= len {
            return None;
        }
        if index <= len / 2 {
            let mut current = self.head?;
            for _ in 0..index {
                current = self.nodes.get(current)?.next?;
            }
            Some(current)
        } else {
            let mut current = self.tail?;
            for _ in 0..(len - 1 - index) {
                current = self.nodes.get(current)?.prev?;
            }
            Some(current)
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.iter_ids().map(|id| &self.nodes[id].value)
    }

    /// Iterates node handles front to back.
    pub fn iter_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        let mut current = self.head;
        std::iter::from_fn(move || {
            let id = current?;
            current = self.nodes.get(id)?.next;
            Some(id)
        })
    }

    // Unlinks `id` from the chain, patching neighbors and head/tail. The
    // node itself keeps stale links until relinked or removed.
    fn detach(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = &self.nodes[id];
            (node.prev, node.next)
        };
        match prev {
            Some(prev_id) => self.nodes[prev_id].next = next,
            None => self.head = next,
        }
        match next {
            Some(next_id) => self.nodes[next_id].prev = prev,
            None => self.tail = prev,
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.head.is_none(), self.tail.is_none());
        if self.head.is_none() {
            assert_eq!(self.len(), 0);
            return;
        }

        let head = self.head.expect("checked above");
        let tail = self.tail.expect("checked above");
        assert_eq!(self.nodes[head].prev, None, "head must have no predecessor");
        assert_eq!(self.nodes[tail].next, None, "tail must have no successor");

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.nodes.get(id).expect("linked node must be live");
            assert_eq!(node.prev, prev, "back-link mismatch");
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in list chain");
        }
        assert_eq!(prev, Some(tail), "forward walk must end at tail");
        assert_eq!(count, self.len(), "walk visited a different node count");
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}
