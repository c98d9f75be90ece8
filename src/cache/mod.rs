//! Cache Module
//!
//! Provides the in-memory response cache with time-based expiry.
//!
//! Entries are only ever removed by the reaper, once they are older than
//! the store's TTL. There is no capacity bound: memory grows with the number
//! of distinct keys written within one TTL window.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

pub(crate) use store::Shared;
