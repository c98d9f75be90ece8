//! Cache Store Module
//!
//! Time-bounded key/value store guarded by a single mutex, swept by a
//! background reaper task that lives as long as the store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::warn;

use crate::cache::{CacheEntry, CacheStats};
use crate::error::{PokedexError, Result};
use crate::tasks::spawn_reaper_task;

// == Shared State ==
/// State shared between the store handle and its reaper.
#[derive(Debug)]
pub(crate) struct Shared {
    state: Mutex<CacheState>,
    /// Expiry age and sweep period
    pub(crate) ttl: Duration,
    /// Fired once when the store is closed or dropped
    pub(crate) shutdown: Notify,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl Shared {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            ttl,
            shutdown: Notify::new(),
        }
    }

    // Every critical section is a single map operation or a retain pass,
    // so a poisoned lock still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Sweep ==
    /// Removes every entry older than the TTL.
    ///
    /// Returns the number of entries removed.
    pub(crate) fn sweep(&self) -> usize {
        let mut state = self.lock();
        let now = Instant::now();
        let ttl = self.ttl;

        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired(now, ttl));
        let remaining = state.entries.len();

        state.stats.record_sweep(before - remaining);
        state.stats.set_total_entries(remaining);
        before - remaining
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let state = self.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }
}

// == TTL Cache ==
/// Concurrent URL → body cache whose entries expire a fixed interval after
/// they were last written.
///
/// The store is meant to be shared behind an `Arc`; all operations take
/// `&self`. Dropping the last handle stops the reaper.
#[derive(Debug)]
pub struct TtlCache {
    shared: Arc<Shared>,
    reaper: Option<JoinHandle<()>>,
}

impl TtlCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current Tokio
    /// runtime.
    ///
    /// The reaper sweeps once per `ttl`, so an entry may outlive its TTL by
    /// just under one further interval.
    ///
    /// # Errors
    /// - `InvalidInterval` if `ttl` is zero or too large to schedule a sweep
    /// - `RuntimeUnavailable` if called outside a Tokio runtime
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(PokedexError::InvalidInterval(ttl));
        }
        let runtime = Handle::try_current().map_err(|_| PokedexError::RuntimeUnavailable)?;
        let first_sweep = Instant::now()
            .checked_add(ttl)
            .ok_or(PokedexError::InvalidInterval(ttl))?;

        let shared = Arc::new(Shared::new(ttl));
        let reaper = spawn_reaper_task(&runtime, shared.clone(), first_sweep);

        Ok(Self {
            shared,
            reaper: Some(reaper),
        })
    }

    // == Add ==
    /// Inserts or overwrites `key`, restarting its expiry window.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let entry = CacheEntry::new(value.into());
        let mut state = self.shared.lock();
        state.entries.insert(key.into(), entry);
        let count = state.entries.len();
        state.stats.set_total_entries(count);
    }

    // == Get ==
    /// Returns the stored body for `key`, if present.
    ///
    /// Lookups do not refresh the entry's expiry window.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let mut state = self.shared.lock();
        let value = state.entries.get(key).map(|entry| entry.value.clone());
        match value {
            Some(_) => state.stats.record_hit(),
            None => state.stats.record_miss(),
        }
        value
    }

    /// Expiry age and sweep period.
    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    /// Current number of entries, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        self.shared.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.shared.stats()
    }

    // == Close ==
    /// Stops the reaper and waits for it to exit.
    pub async fn close(mut self) {
        self.shared.shutdown.notify_one();
        if let Some(reaper) = self.reaper.take() {
            if let Err(err) = reaper.await {
                warn!(error = %err, "Cache reaper ended abnormally");
            }
        }
    }
}

impl Drop for TtlCache {
    fn drop(&mut self) {
        // The reaper holds its own Arc; it releases it on its next wake.
        self.shared.shutdown.notify_one();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = TtlCache::new(Duration::from_secs(5));
        assert!(matches!(result, Err(PokedexError::RuntimeUnavailable)));
    }

    #[tokio::test]
    async fn test_new_zero_interval_fails() {
        let result = TtlCache::new(Duration::ZERO);
        assert!(matches!(result, Err(PokedexError::InvalidInterval(_))));
    }

    #[tokio::test]
    async fn test_new_oversized_interval_fails() {
        let result = TtlCache::new(Duration::MAX);
        assert!(matches!(result, Err(PokedexError::InvalidInterval(ttl)) if ttl == Duration::MAX));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_new_is_empty() {
        let cache = TtlCache::new(Duration::from_secs(5)).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.ttl(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_and_get() {
        let cache = TtlCache::new(Duration::from_secs(5)).unwrap();

        cache.add("https://example.com", "test data");

        assert_eq!(
            cache.get("https://example.com"),
            Some(Bytes::from_static(b"test data"))
        );
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_missing_key() {
        let cache = TtlCache::new(Duration::from_secs(5)).unwrap();
        assert_eq!(cache.get("https://example.com/missing"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_replaces_value() {
        let cache = TtlCache::new(Duration::from_secs(5)).unwrap();

        cache.add("key1", "value1");
        cache.add("key1", "value2");

        assert_eq!(cache.get("key1"), Some(Bytes::from_static(b"value2")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_expires_entry() {
        let interval = Duration::from_millis(10);
        let cache = TtlCache::new(interval).unwrap();

        cache.add("test", "test data");
        assert!(cache.get("test").is_some(), "data should exist before interval");

        tokio::time::sleep(interval * 2 + Duration::from_millis(5)).await;

        assert!(cache.get("test").is_none(), "data should have been reaped");
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_does_not_refresh_entry() {
        let cache = TtlCache::new(Duration::from_millis(100)).unwrap();
        cache.add("k", "v");

        for _ in 0..5 {
            tokio::time::sleep(Duration::from_millis(30)).await;
            let _ = cache.get("k");
        }
        // t = 150ms: swept at 100ms (age 100) or at the latest at 200ms.
        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(cache.get("k").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_expiry() {
        let cache = TtlCache::new(Duration::from_millis(100)).unwrap();

        cache.add("k", "v1");
        tokio::time::sleep(Duration::from_millis(80)).await;
        cache.add("k", "v2");

        // Sweep at 100ms sees an entry 20ms old.
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"v2")));

        // Sweep at 200ms sees it 120ms old.
        tokio::time::sleep(Duration::from_millis(90)).await;
        assert!(cache.get("k").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_track_lookups_and_sweeps() {
        let cache = TtlCache::new(Duration::from_millis(50)).unwrap();

        cache.add("a", "1");
        cache.add("b", "2");
        cache.get("a");
        cache.get("missing");

        tokio::time::sleep(Duration::from_millis(120)).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.sweeps, 2);
        assert_eq!(stats.expired, 2);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_keeps_fresh_entries() {
        let shared = Shared::new(Duration::from_secs(10));
        shared.lock().entries.insert(
            "fresh".to_string(),
            CacheEntry::new(Bytes::from_static(b"v")),
        );

        tokio::time::advance(Duration::from_secs(3)).await;

        assert_eq!(shared.sweep(), 0);
        assert!(shared.lock().entries.contains_key("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_stops_reaper() {
        let cache = TtlCache::new(Duration::from_secs(60)).unwrap();
        let shared = Arc::downgrade(&cache.shared);

        cache.close().await;

        assert!(shared.upgrade().is_none(), "reaper should release the store");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_reaper() {
        let cache = TtlCache::new(Duration::from_secs(60)).unwrap();
        let shared = Arc::downgrade(&cache.shared);

        drop(cache);
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        assert!(shared.upgrade().is_none(), "reaper should exit after drop");
    }
}
