//! TTL Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, trace, warn};

use crate::cache::{CacheStore, Equally, KeyIndex};
use crate::error::{CacheError, Result};

/// Longest period between sweeps; longer intervals are clamped to it.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24 * 365);

// == Sweep ==
/// Something the sweeper can reclaim expired entries from.
pub trait Sweep: Send + Sync + 'static {
    /// Removes expired entries, returning how many were removed.
    fn sweep(&self) -> usize;
}

impl<K, V, I> Sweep for RwLock<CacheStore<K, V, I>>
where
    K: Equally + Send + Sync + 'static,
    V: Send + Sync + 'static,
    I: KeyIndex<K> + Send + Sync + 'static,
{
    fn sweep(&self) -> usize {
        self.write().clear_expired()
    }
}

// == Sweeper ==
/// Handle to a running sweeper task.
///
/// Dropping the handle signals the task to stop before its next tick.
#[derive(Debug)]
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Signals the task to stop without waiting for it.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Signals the task to stop and waits until it has exited.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!(error = %err, "TTL sweeper task failed");
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task holds only a weak reference to `target` and exits when the
/// target is dropped, when the returned handle is dropped, or on
/// [`Sweeper::shutdown`]. Ticks delayed by lock contention are caught up
/// rather than skipped.
///
/// # Errors
/// Returns `CacheError::NoRuntime` when called outside a tokio runtime.
///
/// Intervals longer than a year are clamped to a year.
///
/// # Panics
/// Panics if `interval` is zero.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::<String, String>::new(1000, ttl)));
/// let sweeper = spawn_sweeper(Arc::downgrade(&store), Duration::from_secs(1))?;
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweeper<T: Sweep>(target: Weak<T>, interval: Duration) -> Result<Sweeper> {
    let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let period = interval.min(MAX_SWEEP_INTERVAL);

    let handle = runtime.spawn(async move {
        info!(interval_ms = period.as_millis() as u64, "Starting TTL sweeper");

        let mut ticker = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                biased;

                // Fires on an explicit stop and when the handle is dropped
                _ = shutdown_rx.changed() => break,

                _ = ticker.tick() => {
                    let Some(store) = target.upgrade() else {
                        break;
                    };

                    let removed = store.sweep();
                    if removed > 0 {
                        debug!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        trace!("TTL sweep: no expired entries found");
                    }
                }
            }
        }

        info!("TTL sweeper stopped");
    });

    Ok(Sweeper {
        shutdown,
        handle: Some(handle),
    })
}
