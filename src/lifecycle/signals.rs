//! OS signal handling.
//!
//! - SIGINT (Ctrl-C) and SIGTERM end the process gracefully
//! - SIGHUP reparses the snapshot files without restarting

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::snapshot::SnapshotProvider;

/// Resolve when SIGINT or SIGTERM is received.
pub async fn wait_for_termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received"),
        _ = terminate => tracing::info!("SIGTERM received"),
    }
}

/// Reparse snapshots on every SIGHUP until shutdown.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(
    provider: Arc<SnapshotProvider>,
    mut shutdown: broadcast::Receiver<()>,
) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for SIGHUP, manual reload disabled");
            return;
        }
    };

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = hangup.recv() => {
                    tracing::info!("SIGHUP received, reloading snapshots");
                    let _ = provider.refresh().await;
                }
                _ = shutdown.recv() => break,
            }
        }
    });
}

#[cfg(not(unix))]
pub fn spawn_reload_on_hangup(_provider: Arc<SnapshotProvider>, _shutdown: broadcast::Receiver<()>) {}
