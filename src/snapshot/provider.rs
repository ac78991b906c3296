//! Shared snapshot with a refresh policy.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;

use crate::config::{RefreshConfig, RefreshPolicy};
use crate::observability::metrics;
use crate::snapshot::model::Snapshots;
use crate::snapshot::source::{SnapshotError, SnapshotSource};

/// Hands out the current snapshot according to the configured policy.
///
/// Under `per_request` every call parses the source. Under `ttl` and
/// `watch` the last good snapshot is cached and replaced atomically; a
/// failed refresh leaves it in place.
pub struct SnapshotProvider {
    source: Arc<dyn SnapshotSource>,
    config: RefreshConfig,
    current: ArcSwapOption<Snapshots>,
    /// Serializes refreshes so concurrent requests parse once.
    refresh_lock: Mutex<RefreshState>,
}

/// Outcome of the last refresh, guarded by the refresh lock.
#[derive(Debug, Default)]
struct RefreshState {
    /// When the last refresh failed and why; cleared by a success.
    failure: Option<(Instant, String)>,
}

impl RefreshState {
    /// The last failure, if it happened less than `window` ago.
    fn recent_failure(&self, window: Duration) -> Option<&str> {
        self.failure
            .as_ref()
            .filter(|(at, _)| at.elapsed() < window)
            .map(|(_, message)| message.as_str())
    }
}

impl SnapshotProvider {
    pub fn new(source: Arc<dyn SnapshotSource>, config: RefreshConfig) -> Self {
        Self {
            source,
            config,
            current: ArcSwapOption::empty(),
            refresh_lock: Mutex::new(RefreshState::default()),
        }
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.config.policy
    }

    pub fn source(&self) -> &Arc<dyn SnapshotSource> {
        &self.source
    }

    /// The cached snapshot, if one was ever loaded.
    pub fn current(&self) -> Option<Arc<Snapshots>> {
        self.current.load_full()
    }

    /// Load the first snapshot for the caching policies.
    ///
    /// Failure is logged, not fatal: requests get `NotLoaded` until a
    /// later refresh succeeds.
    pub async fn initialize(&self) -> bool {
        if self.config.policy == RefreshPolicy::PerRequest {
            return true;
        }
        match self.refresh().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Initial snapshot load failed, serving 503 until a refresh succeeds");
                false
            }
        }
    }

    /// Snapshot to answer one request from.
    pub async fn snapshot(&self) -> Result<Arc<Snapshots>, SnapshotError> {
        match self.config.policy {
            RefreshPolicy::PerRequest => self.load().await.map(Arc::new),
            RefreshPolicy::Ttl => {
                let mut failure = None;
                if self.is_stale() {
                    let mut state = self.refresh_lock.lock().await;
                    // Another request may have refreshed while we waited.
                    if self.is_stale() {
                        // Not before a full ttl has passed since the last failure.
                        failure = match state.recent_failure(self.ttl()) {
                            Some(message) => Some(SnapshotError::Backoff(message.to_string())),
                            None => self.store_fresh(&mut state).await.err(),
                        };
                    }
                }
                match (self.current(), failure) {
                    (Some(snapshots), _) => Ok(snapshots),
                    (None, Some(e)) => Err(e),
                    (None, None) => Err(SnapshotError::NotLoaded),
                }
            }
            RefreshPolicy::Watch => self.current().ok_or(SnapshotError::NotLoaded),
        }
    }

    /// Reparse the source now and swap in the result.
    pub async fn refresh(&self) -> Result<Arc<Snapshots>, SnapshotError> {
        let mut state = self.refresh_lock.lock().await;
        self.store_fresh(&mut state).await
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_secs)
    }

    fn is_stale(&self) -> bool {
        let ttl = self.ttl();
        self.current()
            .map_or(true, |snapshots| snapshots.loaded_at.elapsed() >= ttl)
    }

    async fn store_fresh(&self, state: &mut RefreshState) -> Result<Arc<Snapshots>, SnapshotError> {
        match self.load().await {
            Ok(snapshots) => {
                state.failure = None;
                let snapshots = Arc::new(snapshots);
                self.current.store(Some(Arc::clone(&snapshots)));
                metrics::record_refresh("success");
                metrics::record_snapshot_hosts(snapshots.status.len());
                tracing::info!(
                    hosts = snapshots.status.len(),
                    classes = snapshots.objects.len(),
                    "Snapshot refreshed"
                );
                Ok(snapshots)
            }
            Err(e) => {
                state.failure = Some((Instant::now(), e.to_string()));
                metrics::record_refresh("failure");
                tracing::error!(error = %e, "Snapshot refresh failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    async fn load(&self) -> Result<Snapshots, SnapshotError> {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| SnapshotError::Task(e.to_string()))?
    }
}
