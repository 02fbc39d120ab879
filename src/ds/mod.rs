//! Policy-agnostic data structures: the slot arena the rest of the crate
//! allocates from, the recency list, and the indexed heap.

pub mod indexed_heap;
pub mod ordered_list;
pub mod slot_arena;

pub use indexed_heap::{HeapOrder, IndexedHeap};
pub use ordered_list::OrderedList;
pub use slot_arena::{SlotArena, SlotId};
