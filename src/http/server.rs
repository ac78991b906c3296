//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the query handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Start the snapshot watcher and SIGHUP reload
//! - Bind server to listener and run until shutdown
//! - Resolve, project, encode each request
//! - Observability (metrics, request IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use notify::RecommendedWatcher;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::{NagiraConfig, RefreshPolicy};
use crate::format::Format;
use crate::http::error::ApiError;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response;
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::projection::project;
use crate::routing::{resolve, ResolvedPath, Route};
use crate::snapshot::watcher::{reload_on_change, SnapshotWatcher};
use crate::snapshot::{FileSource, SnapshotProvider, SnapshotSource};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<SnapshotProvider>,
    pub default_format: Format,
}

/// HTTP server for the monitoring API.
pub struct HttpServer {
    router: Router,
    config: NagiraConfig,
    provider: Arc<SnapshotProvider>,
}

impl HttpServer {
    /// Create a server reading the snapshot files named in `config`.
    pub fn new(config: NagiraConfig) -> Self {
        let source = Arc::new(FileSource::from_config(&config.sources));
        Self::with_source(config, source)
    }

    /// Create a server over an arbitrary snapshot source.
    pub fn with_source(config: NagiraConfig, source: Arc<dyn SnapshotSource>) -> Self {
        let provider = Arc::new(SnapshotProvider::new(source, config.refresh.clone()));

        let state = AppState {
            provider: provider.clone(),
            default_format: config.output.default_format,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            provider,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &NagiraConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", get(query_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            policy = ?self.config.refresh.policy,
            default_format = %self.config.output.default_format,
            "HTTP server starting"
        );

        // Watch before the first load so a write during it is not missed.
        let _watcher = self.start_watcher(&shutdown);
        self.provider.initialize().await;
        signals::spawn_reload_on_hangup(self.provider.clone(), shutdown.resubscribe());

        let mut server_shutdown = shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = server_shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &NagiraConfig {
        &self.config
    }

    pub fn provider(&self) -> &Arc<SnapshotProvider> {
        &self.provider
    }

    fn start_watcher(&self, shutdown: &broadcast::Receiver<()>) -> Option<RecommendedWatcher> {
        if self.config.refresh.policy != RefreshPolicy::Watch {
            return None;
        }
        let paths = self.provider.source().watched_paths();
        if paths.is_empty() {
            return None;
        }

        let poll_interval = Duration::from_secs(self.config.refresh.poll_interval_secs);
        let (watcher, changes) = SnapshotWatcher::new(&paths, poll_interval);
        match watcher.run() {
            Ok(handle) => {
                tokio::spawn(reload_on_change(
                    self.provider.clone(),
                    changes,
                    shutdown.resubscribe(),
                ));
                Some(handle)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to start snapshot watcher: {}. Snapshots refresh on SIGHUP only.",
                    e
                );
                None
            }
        }
    }
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id(request),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Main query handler.
/// Resolves the path, projects the snapshot, and encodes the result.
async fn query_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let start_time = Instant::now();
    let path = uri.path();

    let Some(resolved) = resolve(path, state.default_format) else {
        tracing::debug!(path = %path, "No route matched");
        metrics::record_request("none", 404, "none", start_time);
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    };

    let response = match resolved.route {
        Route::Api => response::not_implemented(),
        _ => answer(&state, &resolved)
            .await
            .unwrap_or_else(|e| e.into_response()),
    };

    metrics::record_request(
        resolved.route.pattern(),
        response.status().as_u16(),
        resolved.format.extension(),
        start_time,
    );
    response
}

async fn answer(state: &AppState, resolved: &ResolvedPath) -> Result<Response, ApiError> {
    let snapshots = state.provider.snapshot().await?;
    let value = project(&resolved.route, resolved.mode, &snapshots);
    if value.is_none() {
        tracing::debug!(
            route = resolved.route.pattern(),
            mode = resolved.mode.as_str(),
            "No data for request"
        );
    }
    response::formatted(resolved.format, value)
}
