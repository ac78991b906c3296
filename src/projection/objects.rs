//! Projections over configured object definitions.

use serde_json::Value;

use super::{names, OutputMode};
use crate::snapshot::model::{fields_to_value, ObjectSnapshot};

/// `/objects`: class names, or every class with its objects.
pub(super) fn all(objects: &ObjectSnapshot, mode: OutputMode) -> Value {
    match mode {
        OutputMode::List => names(objects.keys()),
        _ => Value::Object(
            objects
                .iter()
                .map(|(class, members)| {
                    let members = members
                        .iter()
                        .map(|(name, fields)| (name.clone(), fields_to_value(fields)))
                        .collect();
                    (class.clone(), Value::Object(members))
                })
                .collect(),
        ),
    }
}

/// `/objects/{class}`: object names, or every object of the class.
pub(super) fn class(objects: &ObjectSnapshot, class: &str, mode: OutputMode) -> Option<Value> {
    let members = objects.get(class)?;
    Some(match mode {
        OutputMode::List => names(members.keys()),
        _ => Value::Object(
            members
                .iter()
                .map(|(name, fields)| (name.clone(), fields_to_value(fields)))
                .collect(),
        ),
    })
}

/// `/objects/{class}/{name}`: one object's fields in every mode.
pub(super) fn object(objects: &ObjectSnapshot, class: &str, name: &str) -> Option<Value> {
    objects.get(class)?.get(name).map(fields_to_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::fixtures::snapshots;
    use serde_json::json;

    #[test]
    fn test_class_names() {
        let snapshots = snapshots();
        assert_eq!(all(&snapshots.objects, OutputMode::List), json!(["host", "hostgroup"]));
    }

    #[test]
    fn test_all_objects() {
        let snapshots = snapshots();
        let value = all(&snapshots.objects, OutputMode::Full);
        assert_eq!(value["hostgroup"]["webservers"]["members"], json!("web01"));
        assert_eq!(value["host"].as_object().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_state_mode_is_full_for_objects() {
        let snapshots = snapshots();
        assert_eq!(
            all(&snapshots.objects, OutputMode::State),
            all(&snapshots.objects, OutputMode::Full)
        );
    }

    #[test]
    fn test_object_names_in_class() {
        let snapshots = snapshots();
        assert_eq!(
            class(&snapshots.objects, "host", OutputMode::List),
            Some(json!(["db01", "web01"]))
        );
    }

    #[test]
    fn test_unknown_class() {
        let snapshots = snapshots();
        assert_eq!(class(&snapshots.objects, "printer", OutputMode::Full), None);
        assert_eq!(class(&snapshots.objects, "Host", OutputMode::List), None);
    }

    #[test]
    fn test_single_object() {
        let snapshots = snapshots();
        assert_eq!(
            object(&snapshots.objects, "host", "web01"),
            Some(json!({"host_name": "web01", "address": "10.0.0.5"}))
        );
        assert_eq!(object(&snapshots.objects, "host", "mail01"), None);
        assert_eq!(object(&snapshots.objects, "printer", "web01"), None);
    }
}
