//! In-memory snapshot types.
//!
//! Both snapshots are ordered maps so that every encoding of the same
//! snapshot is byte-identical.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use serde_json::{Map, Value};

/// Untyped field values of a single status or object block.
pub type FieldMap = BTreeMap<String, Value>;

/// Host name → host and service status.
pub type StatusSnapshot = BTreeMap<String, HostStatus>;

/// Object class → object name → definition fields.
pub type ObjectSnapshot = BTreeMap<String, BTreeMap<String, FieldMap>>;

/// Status of one host and all of its services.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostStatus {
    /// Fields of the `hoststatus` block.
    pub hoststatus: FieldMap,

    /// Service description → fields of its `servicestatus` block.
    pub servicestatus: BTreeMap<String, FieldMap>,
}

impl HostStatus {
    /// Convert to an untyped value with the `hoststatus` and
    /// `servicestatus` keys.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("hoststatus".to_string(), fields_to_value(&self.hoststatus));
        map.insert(
            "servicestatus".to_string(),
            Value::Object(
                self.servicestatus
                    .iter()
                    .map(|(name, fields)| (name.clone(), fields_to_value(fields)))
                    .collect(),
            ),
        );
        Value::Object(map)
    }
}

/// Both parsed snapshots, immutable once built.
#[derive(Debug, Clone)]
pub struct Snapshots {
    pub status: StatusSnapshot,
    pub objects: ObjectSnapshot,
    /// When the source files were parsed.
    pub loaded_at: Instant,
}

impl Snapshots {
    pub fn new(status: StatusSnapshot, objects: ObjectSnapshot) -> Self {
        Self {
            status,
            objects,
            loaded_at: Instant::now(),
        }
    }
}

/// Copy a field map into an untyped JSON-like object.
pub fn fields_to_value(fields: &FieldMap) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}
