//! Snapshot refresh behaviour of the running server.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use nagira::config::RefreshPolicy;
use nagira::snapshot::{FileSource, SnapshotError, SnapshotSource, Snapshots};
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{client, start_server, start_server_with_source, Fixture, STATUS_DAT};

const EXTRA_HOST: &str = "\nhoststatus {\n\thost_name=mail01\n\tcurrent_state=0\n\t}\n";

async fn host_list(client: &reqwest::Client, url: &str) -> Value {
    client.get(url).send().await.unwrap().json().await.unwrap()
}

async fn wait_for_hosts(client: &reqwest::Client, url: &str, expected: Value) {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let hosts = host_list(client, url).await;
        if hosts == expected {
            return;
        }
        assert!(Instant::now() < deadline, "snapshot was not reloaded: {hosts}");
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

/// File source whose first load is followed by a daemon-style rewrite
/// of the status file, before the load returns.
struct RewriteDuringFirstLoad {
    inner: FileSource,
    status_path: PathBuf,
    loads: AtomicUsize,
}

impl SnapshotSource for RewriteDuringFirstLoad {
    fn load(&self) -> Result<Snapshots, SnapshotError> {
        let snapshots = self.inner.load();
        if self.loads.fetch_add(1, Ordering::SeqCst) == 0 {
            common::replace(&self.status_path, &format!("{STATUS_DAT}{EXTRA_HOST}"));
        }
        snapshots
    }

    fn watched_paths(&self) -> Vec<PathBuf> {
        self.inner.watched_paths()
    }
}

#[tokio::test]
async fn test_per_request_sees_changes_immediately() {
    let fixture = Fixture::new();
    let server = start_server(fixture.config(RefreshPolicy::PerRequest)).await;
    let client = client();
    let url = server.url("/status/list.json");

    assert_eq!(host_list(&client, &url).await, json!(["db01", "web01"]));

    fixture.replace_status(&format!("{STATUS_DAT}{EXTRA_HOST}"));
    assert_eq!(host_list(&client, &url).await, json!(["db01", "mail01", "web01"]));
}

#[tokio::test]
async fn test_per_request_missing_file_is_503() {
    let fixture = Fixture::new();
    let server = start_server(fixture.config(RefreshPolicy::PerRequest)).await;

    fs::remove_file(&fixture.status_path).unwrap();
    let res = client().get(server.url("/status.json")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(res.text().await.unwrap().contains("status.dat"));
}

#[tokio::test]
async fn test_watch_reloads_on_file_change() {
    let fixture = Fixture::new();
    let server = start_server(fixture.config(RefreshPolicy::Watch)).await;
    let client = client();
    let url = server.url("/status/list.json");

    assert_eq!(host_list(&client, &url).await, json!(["db01", "web01"]));

    fixture.replace_status(&format!("{STATUS_DAT}{EXTRA_HOST}"));
    wait_for_hosts(&client, &url, json!(["db01", "mail01", "web01"])).await;
}

#[tokio::test]
async fn test_watch_sees_write_during_initial_load() {
    let fixture = Fixture::new();
    let config = fixture.config(RefreshPolicy::Watch);
    let source = Arc::new(RewriteDuringFirstLoad {
        inner: FileSource::from_config(&config.sources),
        status_path: fixture.status_path.clone(),
        loads: AtomicUsize::new(0),
    });
    let server = start_server_with_source(config, source).await;

    wait_for_hosts(&client(), &server.url("/status/list.json"), json!(["db01", "mail01", "web01"]))
        .await;
}

#[tokio::test]
async fn test_watch_keeps_snapshot_when_rewrite_is_malformed() {
    let fixture = Fixture::new();
    let server = start_server(fixture.config(RefreshPolicy::Watch)).await;
    let client = client();
    let url = server.url("/status/list.json");

    fixture.replace_status("hoststatus {\n\thost_name=broken\n");
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(host_list(&client, &url).await, json!(["db01", "web01"]));
}

#[tokio::test]
async fn test_watch_without_initial_snapshot_is_503() {
    let fixture = Fixture::new();
    fs::remove_file(&fixture.objects_path).unwrap();
    let server = start_server(fixture.config(RefreshPolicy::Watch)).await;

    let res = client().get(server.url("/objects.json")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_ttl_serves_cached_snapshot() {
    let fixture = Fixture::new();
    let mut config = fixture.config(RefreshPolicy::Ttl);
    config.refresh.ttl_secs = 3600;
    let server = start_server(config).await;
    let client = client();
    let url = server.url("/status/list.json");

    assert_eq!(host_list(&client, &url).await, json!(["db01", "web01"]));

    fixture.replace_status(&format!("{STATUS_DAT}{EXTRA_HOST}"));
    assert_eq!(host_list(&client, &url).await, json!(["db01", "web01"]));
}
