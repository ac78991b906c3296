//! Read-only HTTP API over Nagios status and object snapshots.

pub mod config;
pub mod format;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod parser;
pub mod projection;
pub mod routing;
pub mod snapshot;

pub use config::NagiraConfig;
pub use format::Format;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use projection::OutputMode;
