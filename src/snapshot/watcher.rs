//! Snapshot file watcher for reload-on-change.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::snapshot::provider::SnapshotProvider;

/// A watcher that monitors the snapshot files for changes.
///
/// The parent directories are watched rather than the files, because the
/// monitoring daemon replaces its dumps by renaming a temporary file over
/// them.
pub struct SnapshotWatcher {
    targets: Vec<PathBuf>,
    poll_interval: Duration,
    change_tx: mpsc::UnboundedSender<()>,
}

impl SnapshotWatcher {
    /// Create a new SnapshotWatcher.
    ///
    /// Returns the watcher and a receiver that yields once per relevant
    /// file system event.
    pub fn new(paths: &[PathBuf], poll_interval: Duration) -> (Self, mpsc::UnboundedReceiver<()>) {
        let (change_tx, change_rx) = mpsc::unbounded_channel();

        (
            Self {
                targets: paths.iter().map(|p| absolute(p)).collect(),
                poll_interval,
                change_tx,
            },
            change_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// Watching stops when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.change_tx.clone();
        let targets = self.targets.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let relevant = (event.kind.is_modify() || event.kind.is_create())
                        && event.paths.iter().any(|p| targets.contains(p));
                    if relevant {
                        tracing::debug!(paths = ?event.paths, "Snapshot file change detected");
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        let dirs: BTreeSet<&Path> = self.targets.iter().filter_map(|p| p.parent()).collect();
        for dir in dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
        }

        tracing::info!(paths = ?self.targets, "Snapshot watcher started");
        Ok(watcher)
    }
}

/// Refresh `provider` for every batch of change notifications until
/// shutdown.
pub async fn reload_on_change(
    provider: Arc<SnapshotProvider>,
    mut changes: mpsc::UnboundedReceiver<()>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            change = changes.recv() => {
                if change.is_none() {
                    break;
                }
                // One write usually produces several events.
                while changes.try_recv().is_ok() {}
                let _ = provider.refresh().await;
            }
            _ = shutdown.recv() => {
                tracing::info!("Snapshot watcher received shutdown signal, exiting loop");
                break;
            }
        }
    }
}

/// Canonical directory joined with the file name, matching the paths
/// notify reports.
fn absolute(path: &Path) -> PathBuf {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let dir = parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf());
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir,
    }
}
