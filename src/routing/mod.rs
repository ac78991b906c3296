//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path, e.g. /status/web01/services/http/state.json
//!     → resolver.rs (strip `.json|.yaml|.xml`, then `/list|/state`)
//!     → router.rs (match remaining segments against the route table)
//!     → Return: ResolvedPath { route, mode, format } or no match
//! ```
//!
//! # Design Decisions
//! - Format suffix is stripped before mode suffix (`/list.json`, never
//!   `.json/list`)
//! - No regex in hot path (suffix and segment matching only)
//! - Deterministic: same path always resolves to the same route
//! - Route parameters never contain `/`, even percent-encoded

pub mod resolver;
pub mod router;

pub use resolver::{resolve, ResolvedPath};
pub use router::Route;
