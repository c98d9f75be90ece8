//! Cache Reaper Task
//!
//! Background task that sweeps expired entries out of a cache store.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::Shared;

/// Spawns the reaper bound to one cache store.
///
/// The task sleeps for one TTL, sweeps, and repeats; the sweep period is
/// the TTL itself. It exits when the store's shutdown signal fires, which
/// happens on `TtlCache::close` or when the store is dropped.
///
/// # Arguments
/// * `runtime` - Runtime the task is spawned on
/// * `shared` - The store's shared state
/// * `first_sweep` - Deadline of the first sweep, one TTL after construction
///
/// # Returns
/// A JoinHandle for the spawned task, awaited by `TtlCache::close`.
pub(crate) fn spawn_reaper_task(
    runtime: &Handle,
    shared: Arc<Shared>,
    first_sweep: Instant,
) -> JoinHandle<()> {
    runtime.spawn(reap_loop(shared, first_sweep))
}

async fn reap_loop(shared: Arc<Shared>, first_sweep: Instant) {
    let period = shared.ttl;
    let mut ticker = interval_at(first_sweep, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Starting cache reaper with interval of {:?}", period);

    loop {
        tokio::select! {
            _ = shared.shutdown.notified() => {
                debug!("Cache reaper received shutdown signal");
                break;
            }
            _ = ticker.tick() => {
                let removed = shared.sweep();
                if removed > 0 {
                    debug!("Cache sweep: removed {} expired entries", removed);
                } else {
                    debug!("Cache sweep: no expired entries found");
                }
            }
        }
    }
}
