//! Projection engine.
//!
//! # Data Flow
//! ```text
//! (Route, OutputMode) + &Snapshots
//!     → objects.rs / status.rs (lookup, then list / state / full)
//!     → Some(Value) or None (absent)
//! ```
//!
//! # Design Decisions
//! - Pure functions: the snapshot is never modified, results are new values
//! - Every lookup returns present-or-absent explicitly; nothing panics on
//!   a missing key
//! - Empty mappings and empty lists count as absent
//! - State projections keep only the named fields the record actually has

mod objects;
mod status;

use std::str::FromStr;

use serde_json::Value;

use crate::routing::Route;
use crate::snapshot::model::{FieldMap, Snapshots};

/// Granularity of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// The whole matched record.
    #[default]
    Full,
    /// Only the names (keys) under the matched node.
    List,
    /// Only identifying fields and `current_state`.
    State,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Full => "full",
            OutputMode::List => "list",
            OutputMode::State => "state",
        }
    }
}

impl FromStr for OutputMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(OutputMode::Full),
            "list" => Ok(OutputMode::List),
            "state" => Ok(OutputMode::State),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// An output mode name outside `full`, `list` and `state`.
#[derive(Debug, thiserror::Error)]
#[error("unknown output mode `{0}`, expected full, list or state")]
pub struct UnknownMode(pub String);

/// Compute the value `route` addresses under `mode`.
///
/// Returns `None` when a route parameter does not resolve, or when the
/// result would be an empty mapping or list.
pub fn project(route: &Route, mode: OutputMode, snapshots: &Snapshots) -> Option<Value> {
    let value = match route {
        Route::Objects => objects::all(&snapshots.objects, mode),
        Route::ObjectClass { class } => objects::class(&snapshots.objects, class, mode)?,
        Route::Object { class, name } => objects::object(&snapshots.objects, class, name)?,
        Route::Status => status::all(&snapshots.status, mode),
        Route::Host { host } => status::host(&snapshots.status, host, mode)?,
        Route::Services { host } => status::services(&snapshots.status, host, mode)?,
        Route::Service { host, service } => {
            status::service(&snapshots.status, host, service, mode)?
        }
        Route::Api => return None,
    };

    (!is_empty(&value)).then_some(value)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

/// New mapping with only those of `keys` present in `record`.
pub(crate) fn extract(record: &FieldMap, keys: &[&str]) -> Value {
    Value::Object(
        keys.iter()
            .filter_map(|key| record.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect(),
    )
}

/// Sorted list of map keys as a JSON array.
pub(crate) fn names<'a, I>(keys: I) -> Value
where
    I: IntoIterator<Item = &'a String>,
{
    Value::Array(keys.into_iter().cloned().map(Value::String).collect())
}
