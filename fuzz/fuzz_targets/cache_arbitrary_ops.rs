#![no_main]

use libfuzzer_sys::fuzz_target;
use evictkit::builder::{CacheBuilder, CachePolicy};

// Fuzz arbitrary operation sequences on the cache
//
// Picks a policy and a small capacity (including zero) from the input,
// then replays random insert, get, peek, contains, remove, evict, clear
// sequences and re-checks the container invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let policy = match data[0] % 3 {
        0 => CachePolicy::Lru,
        1 => CachePolicy::Lfu,
        _ => CachePolicy::Mfu,
    };
    let capacity = usize::from(data[1] % 33);
    let mut cache = CacheBuilder::new(capacity).build::<u64, u64>(policy);

    let mut idx = 2;
    while idx < data.len() {
        if idx + 1 >= data.len() {
            break;
        }

        let op = data[idx] % 8;
        let key = u64::from(data[idx + 1] % 64);
        let value = u64::from(data[idx + 1]);

        match op {
            0 => {
                // insert
                let existed = cache.contains(&key);
                let previous = cache.insert(key, value);
                assert_eq!(previous.is_some(), existed);
            }
            1 => {
                // get
                if cache.get(&key).is_some() {
                    assert!(cache.contains(&key));
                }
            }
            2 => {
                // peek does not disturb anything
                let first = cache.peek(&key).copied();
                let second = cache.peek(&key).copied();
                assert_eq!(first, second);
            }
            3 => {
                // contains agrees with peek
                assert_eq!(cache.contains(&key), cache.peek(&key).is_some());
            }
            4 => {
                // remove
                let old_len = cache.len();
                if cache.remove(&key).is_some() {
                    assert_eq!(cache.len(), old_len - 1);
                    assert!(!cache.contains(&key));
                }
            }
            5 => {
                // evict
                let old_len = cache.len();
                if let Some((victim, _)) = cache.evict() {
                    assert_eq!(cache.len(), old_len - 1);
                    assert!(!cache.contains(&victim));
                } else {
                    assert!(cache.is_empty());
                }
            }
            6 => {
                // len/capacity consistency
                assert_eq!(cache.capacity(), capacity);
                assert_eq!(cache.is_empty(), cache.len() == 0);
            }
            7 => {
                // clear
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.get(&key), None);
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();

        idx += 2;
    }
});
