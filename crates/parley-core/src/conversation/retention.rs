//! Optional idle-session eviction.
//!
//! Off unless an idle TTL is configured. When enabled, a background task
//! sweeps the store on a fixed interval until its cancellation token fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::store::ConversationStore;

/// Spawn the sweeper. It exits once `cancel` is triggered.
pub fn spawn_idle_sweeper(
    store: Arc<ConversationStore>,
    idle_ttl: Duration,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let max_idle = chrono::Duration::from_std(idle_ttl).unwrap_or(chrono::Duration::MAX);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("idle session sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let evicted = store.evict_idle(max_idle);
                    if evicted > 0 {
                        tracing::info!(
                            evicted,
                            remaining = store.len(),
                            "evicted idle sessions"
                        );
                    }
                }
            }
        }
    })
}
