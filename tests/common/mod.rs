//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use nagira::config::{NagiraConfig, RefreshPolicy};
use nagira::snapshot::{FileSource, SnapshotSource};
use nagira::{HttpServer, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

pub const STATUS_DAT: &str = "\
info {
\tcreated=1716200000
\tversion=3.2.3
\t}

programstatus {
\tnagios_pid=4242
\t}

hoststatus {
\thost_name=web01
\tcurrent_state=0
\tplugin_output=PING OK - Packet loss = 0%
\t}

hoststatus {
\thost_name=db01
\tcurrent_state=1
\tplugin_output=PING CRITICAL
\t}

servicestatus {
\thost_name=web01
\tservice_description=http
\tcurrent_state=2
\tplugin_output=CRITICAL - Socket timeout after 10 seconds
\t}

servicestatus {
\thost_name=web01
\tservice_description=HTTP Check
\tcurrent_state=0
\t}
";

pub const OBJECTS_CACHE: &str = "\
########################################
#       NAGIOS OBJECT CACHE FILE
########################################

define host {
\thost_name\tweb01
\talias\tWeb Server 01
\taddress\t10.0.0.5
\t}

define host {
\thost_name\tdb01
\talias\tDatabase 01
\taddress\t10.0.0.6
\t}

define hostgroup {
\thostgroup_name\twebservers
\tmembers\tweb01
\t}
";

/// Snapshot files in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub status_path: PathBuf,
    pub objects_path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let status_path = dir.path().join("status.dat");
        let objects_path = dir.path().join("objects.cache");
        fs::write(&status_path, STATUS_DAT).unwrap();
        fs::write(&objects_path, OBJECTS_CACHE).unwrap();
        Self {
            dir,
            status_path,
            objects_path,
        }
    }

    /// Replace the status file the way the daemon does: write, then rename.
    pub fn replace_status(&self, contents: &str) {
        replace(&self.status_path, contents);
    }

    pub fn config(&self, policy: RefreshPolicy) -> NagiraConfig {
        let mut config = NagiraConfig::default();
        config.listener.bind_address = "127.0.0.1:0".to_string();
        config.sources.status_path = self.status_path.display().to_string();
        config.sources.objects_path = self.objects_path.display().to_string();
        config.refresh.policy = policy;
        config.refresh.poll_interval_secs = 1;
        config
    }
}

pub fn replace(path: &Path, contents: &str) {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).unwrap();
    fs::rename(&tmp, path).unwrap();
}

/// A running server and the handle that stops it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Bind the configured address and run the server in the background.
pub async fn start_server(config: NagiraConfig) -> TestServer {
    let source = Arc::new(FileSource::from_config(&config.sources));
    start_server_with_source(config, source).await
}

/// Like [`start_server`], reading snapshots from `source`.
pub async fn start_server_with_source(
    config: NagiraConfig,
    source: Arc<dyn SnapshotSource>,
) -> TestServer {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::with_source(config, source);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    TestServer { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

pub fn content_type(res: &reqwest::Response) -> String {
    res.headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
