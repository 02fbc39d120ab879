pub use crate::builder::{BoxedPolicy, Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::cache::{
    ConcurrentCache, ConcurrentLfuCache, ConcurrentLruCache, ConcurrentMfuCache,
};
pub use crate::cache::{CacheCore, LfuCache, LruCache, MfuCache};
pub use crate::ds::{HeapOrder, IndexedHeap, OrderedList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::CacheMetricsSnapshot;
pub use crate::policy::{EvictionPolicy, LfuPolicy, LruPolicy, MfuPolicy, PolicyState};
