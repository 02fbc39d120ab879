#![no_main]

use libfuzzer_sys::fuzz_target;
use evictkit::ds::OrderedList;

// Fuzz arbitrary operation sequences on OrderedList
//
// Tests random sequences of push_front, move_to_front, pop_back, remove,
// at, get, contains, clear operations.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: OrderedList<u32> = OrderedList::new();
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx < data.len() {
        if idx + 1 >= data.len() {
            break;
        }

        let op = data[idx] % 9;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push_front
                let id = list.push_front(value);
                all_ids.push(id);

                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.front(), Some(&value));
                assert!(list.contains(id));
                assert_eq!(list.get(id), Some(&value));
            }
            1 => {
                // pop_back
                let old_len = list.len();
                let popped = list.pop_back();

                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                } else {
                    assert_eq!(list.len(), 0);
                }
            }
            2 => {
                // move_to_front
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];

                    let was_moved = list.move_to_front(id);
                    if was_moved {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            }
            3 => {
                // remove
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];

                    let old_len = list.len();
                    let removed = list.remove(id);

                    if removed.is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            }
            4 => {
                // get (read-only)
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];
                    let _ = list.get(id);
                }
            }
            5 => {
                // contains (read-only)
                if !all_ids.is_empty() {
                    let id_idx = (value as usize) % all_ids.len();
                    let id = all_ids[id_idx];
                    let _ = list.contains(id);
                }
            }
            6 => {
                // positional lookup
                if !list.is_empty() {
                    let pos = (value as usize) % list.len();
                    let id = list.at(pos);
                    assert!(id.is_some_and(|id| list.contains(id)));
                    assert_eq!(list.at(0), list.front_id());
                    assert_eq!(list.at(list.len() - 1), list.back_id());
                }
                assert_eq!(list.at(list.len()), None);
            }
            7 => {
                // Check is_empty consistency
                if list.is_empty() {
                    assert_eq!(list.len(), 0);
                    assert_eq!(list.front(), None);
                    assert_eq!(list.back(), None);
                } else {
                    assert!(list.len() > 0);
                    assert!(list.front().is_some());
                    assert!(list.back().is_some());
                }
            }
            8 => {
                // clear
                list.clear();
                all_ids.clear();

                assert!(list.is_empty());
                assert_eq!(list.len(), 0);
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
            }
            _ => unreachable!(),
        }

        // Full link-structure walk
        list.debug_validate_invariants();

        idx += 2;
    }
});
