//! Micro-operation benchmarks for all cache policies.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency (nanoseconds) for get and insert operations
//! across all eviction policies under identical conditions.

use std::hint::black_box;
use std::time::Instant;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use evictkit::cache::{LfuCache, LruCache, MfuCache};

const CAPACITY: usize = 16_384;
const OPS: u64 = 100_000;

// ============================================================================
// Get Hit Latency (ns/op)
// ============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    // LRU
    group.bench_function("lru", |b| {
        b.iter_custom(|iters| {
            let mut cache: LruCache<u64, u64> = LruCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.insert(i, i);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % (CAPACITY as u64);
                    black_box(cache.get(&key));
                }
            }
            start.elapsed()
        })
    });

    // LFU
    group.bench_function("lfu", |b| {
        b.iter_custom(|iters| {
            let mut cache: LfuCache<u64, u64> = LfuCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.insert(i, i);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % (CAPACITY as u64);
                    black_box(cache.get(&key));
                }
            }
            start.elapsed()
        })
    });

    // MFU
    group.bench_function("mfu", |b| {
        b.iter_custom(|iters| {
            let mut cache: MfuCache<u64, u64> = MfuCache::new(CAPACITY);
            for i in 0..CAPACITY as u64 {
                cache.insert(i, i);
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = i % (CAPACITY as u64);
                    black_box(cache.get(&key));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Insert with Eviction (ns/op)
// ============================================================================

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict_ns");
    group.throughput(Throughput::Elements(OPS));

    // LRU
    group.bench_function("lru", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut cache: LruCache<u64, u64> = LruCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, i);
                }
                let start = Instant::now();
                for i in 0..OPS {
                    let key = CAPACITY as u64 + i;
                    cache.insert(key, key);
                }
                total += start.elapsed();
            }
            total
        })
    });

    // LFU
    group.bench_function("lfu", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut cache: LfuCache<u64, u64> = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, i);
                }
                let start = Instant::now();
                for i in 0..OPS {
                    let key = CAPACITY as u64 + i;
                    cache.insert(key, key);
                }
                total += start.elapsed();
            }
            total
        })
    });

    // MFU
    group.bench_function("mfu", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut cache: MfuCache<u64, u64> = MfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, i);
                }
                let start = Instant::now();
                for i in 0..OPS {
                    let key = CAPACITY as u64 + i;
                    cache.insert(key, key);
                }
                total += start.elapsed();
            }
            total
        })
    });

    group.finish();
}

// ============================================================================
// Mixed Workload (get + insert)
// ============================================================================

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_ops_ns");
    group.throughput(Throughput::Elements(OPS));

    // 80% hits, 20% misses causing inserts
    // LRU
    group.bench_function("lru", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut cache: LruCache<u64, u64> = LruCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, i);
                }
                let start = Instant::now();
                for i in 0..OPS {
                    let key = if i % 5 == 0 {
                        CAPACITY as u64 + i
                    } else {
                        i % (CAPACITY as u64)
                    };
                    if cache.get(&key).is_none() {
                        cache.insert(key, key);
                    }
                }
                total += start.elapsed();
            }
            total
        })
    });

    // LFU
    group.bench_function("lfu", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut cache: LfuCache<u64, u64> = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, i);
                }
                let start = Instant::now();
                for i in 0..OPS {
                    let key = if i % 5 == 0 {
                        CAPACITY as u64 + i
                    } else {
                        i % (CAPACITY as u64)
                    };
                    if cache.get(&key).is_none() {
                        cache.insert(key, key);
                    }
                }
                total += start.elapsed();
            }
            total
        })
    });

    // MFU
    group.bench_function("mfu", |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let mut cache: MfuCache<u64, u64> = MfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.insert(i, i);
                }
                let start = Instant::now();
                for i in 0..OPS {
                    let key = if i % 5 == 0 {
                        CAPACITY as u64 + i
                    } else {
                        i % (CAPACITY as u64)
                    };
                    if cache.get(&key).is_none() {
                        cache.insert(key, key);
                    }
                }
                total += start.elapsed();
            }
            total
        })
    });

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_insert_evict, bench_mixed);
criterion_main!(benches);
