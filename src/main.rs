//! Nagira: monitoring state over HTTP (v1)
//!
//! Serves the hosts, services and object definitions found in a Nagios
//! `status.dat` / `objects.cache` pair as JSON, YAML or XML.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                     NAGIRA                       │
//!                         │                                                  │
//!   GET /status/web01     │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ──────────────────────┼─▶│  http   │──▶│ routing  │──▶│  projection  │   │
//!                         │  │ server  │   │ resolver │   │    engine    │   │
//!                         │  └─────────┘   └──────────┘   └──────┬───────┘   │
//!                         │                                      │           │
//!                         │                        Arc<Snapshots>│           │
//!                         │                                      ▼           │
//!   200 / 404 + body      │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │   status.dat
//!   ◀─────────────────────┼──│response │◀──│  format  │   │   snapshot   │◀──┼── objects.cache
//!                         │  │contract │   │ encoders │   │   provider   │   │
//!                         │  └─────────┘   └──────────┘   └──────────────┘   │
//!                         │                                                  │
//!                         │  config · observability · lifecycle              │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use nagira::config::{load_config, NagiraConfig};
use nagira::lifecycle::startup;
use nagira::observability::logging;

#[derive(Parser)]
#[command(name = "nagira")]
#[command(about = "Read-only HTTP API over Nagios status and object snapshots", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults apply when omitted.
    #[arg(short, long, env = "NAGIRA_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => NagiraConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("nagira v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
