//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use bytes::Bytes;
use tokio::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached response body and the moment it was written.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored body, never inspected
    pub value: Bytes,
    /// Write timestamp (monotonic)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed between the write and `now`.
    ///
    /// Saturates to zero if `now` is earlier than the write.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live; it expires once its age is strictly greater.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation() {
        let entry = CacheEntry::new(Bytes::from_static(b"test_value"));

        assert_eq!(entry.value, Bytes::from_static(b"test_value"));
        assert_eq!(entry.age(Instant::now()), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_age_tracks_clock() {
        let entry = CacheEntry::new(Bytes::from_static(b"v"));

        tokio::time::advance(Duration::from_millis(250)).await;

        assert_eq!(entry.age(Instant::now()), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(Bytes::from_static(b"v"));
        let ttl = Duration::from_secs(5);

        let at_boundary = entry.created_at + ttl;
        assert!(!entry.is_expired(at_boundary, ttl), "Age == TTL is still live");

        let past_boundary = at_boundary + Duration::from_millis(1);
        assert!(entry.is_expired(past_boundary, ttl));
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_saturates_before_creation() {
        tokio::time::advance(Duration::from_secs(1)).await;
        let earlier = Instant::now();
        tokio::time::advance(Duration::from_secs(1)).await;

        let entry = CacheEntry::new(Bytes::new());
        assert_eq!(entry.age(earlier), Duration::ZERO);
        assert!(!entry.is_expired(earlier, Duration::ZERO));
    }
}
