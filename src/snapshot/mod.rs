//! Snapshot store.
//!
//! # Data Flow
//! ```text
//! status.dat + objects.cache
//!     → source.rs (read & parse both files into Snapshots)
//!     → provider.rs (refresh policy, atomic swap of Arc<Snapshots>)
//!     → handlers read one immutable Arc<Snapshots> per request
//!
//! On file change (watch policy) or SIGHUP:
//!     watcher.rs / lifecycle::signals
//!     → provider.refresh()
//!     → parse succeeds: swap; parse fails: keep previous snapshot
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable once built; a refresh builds a new one
//! - Readers never see a partially built snapshot (arc-swap)
//! - Stale-but-available beats unavailable: failed refreshes keep the
//!   previous snapshot

pub mod model;
pub mod provider;
pub mod source;
pub mod watcher;

pub use model::{FieldMap, HostStatus, ObjectSnapshot, Snapshots, StatusSnapshot};
pub use provider::SnapshotProvider;
pub use source::{FileSource, SnapshotError, SnapshotSource};
