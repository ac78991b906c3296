//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Metrics → Bind listener → Server (initial snapshot load) → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → watcher / reload tasks exit → server drains
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     SIGHUP → Reload snapshots, not shutdown
//! ```
//!
//! # Design Decisions
//! - A failed initial snapshot load is not fatal; requests get 503
//! - Listener binds before the server starts so bind errors surface early

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
