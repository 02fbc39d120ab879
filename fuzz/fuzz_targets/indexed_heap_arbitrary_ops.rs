#![no_main]

use libfuzzer_sys::fuzz_target;
use evictkit::ds::{HeapOrder, IndexedHeap};

// Fuzz arbitrary operation sequences on IndexedHeap
//
// Drives random push, pop, touch, set_weight, remove, peek sequences
// against both heap orders and checks the root stays extremal.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let order = if data[0] % 2 == 0 {
        HeapOrder::MinFirst
    } else {
        HeapOrder::MaxFirst
    };
    let mut heap: IndexedHeap<u32> = IndexedHeap::new(order);
    let mut all_ids = Vec::new();

    let mut idx = 1;
    while idx < data.len() {
        if idx + 1 >= data.len() {
            break;
        }

        let op = data[idx] % 8;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push
                let weight = u64::from(value) + 1;
                let id = heap.push(value, weight);
                all_ids.push(id);

                assert!(heap.contains(id));
                assert_eq!(heap.get(id), Some(&value));
                assert_eq!(heap.weight(id), Some(weight));
            }
            1 => {
                // pop
                let old_len = heap.len();
                if let Some((_, weight)) = heap.pop() {
                    assert_eq!(heap.len(), old_len - 1);
                    let root_is_extremal = match heap.order() {
                        HeapOrder::MinFirst => heap.iter().all(|(_, rest)| rest >= weight),
                        HeapOrder::MaxFirst => heap.iter().all(|(_, rest)| rest <= weight),
                    };
                    assert!(root_is_extremal, "popped weight was not the extremal one");
                } else {
                    assert_eq!(heap.len(), 0);
                }
            }
            2 => {
                // touch
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];

                    let before = heap.weight(id);
                    let after = heap.touch(id);
                    match (before, after) {
                        (Some(old), Some(new)) => assert_eq!(new, old + 1),
                        (None, None) => {}
                        _ => panic!("touch changed slot occupancy"),
                    }
                }
            }
            3 => {
                // set_weight
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];

                    let updated = heap.set_weight(id, u64::from(value));
                    if updated {
                        assert_eq!(heap.weight(id), Some(u64::from(value)));
                    }
                }
            }
            4 => {
                // remove
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];

                    let old_len = heap.len();
                    if heap.remove(id).is_some() {
                        assert_eq!(heap.len(), old_len - 1);
                        assert!(!heap.contains(id));
                        assert_eq!(heap.weight(id), None);
                    }
                }
            }
            5 => {
                // peek matches the extremal weight
                if let Some((_, weight)) = heap.peek() {
                    let extremal = match heap.order() {
                        HeapOrder::MinFirst => heap.iter().map(|(_, w)| w).min(),
                        HeapOrder::MaxFirst => heap.iter().map(|(_, w)| w).max(),
                    };
                    assert_eq!(extremal, Some(weight));
                } else {
                    assert!(heap.is_empty());
                }
            }
            6 => {
                // get/weight (read-only)
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];
                    assert_eq!(heap.get(id).is_some(), heap.weight(id).is_some());
                }
            }
            7 => {
                // clear
                heap.clear();
                all_ids.clear();

                assert!(heap.is_empty());
                assert_eq!(heap.len(), 0);
                assert_eq!(heap.peek(), None);
            }
            _ => unreachable!(),
        }

        // Heap shape and position-map walk
        heap.debug_validate_invariants();

        idx += 2;
    }
});
