//! Projections over live host and service status.

use serde_json::Value;

use super::{extract, names, OutputMode};
use crate::snapshot::model::{fields_to_value, StatusSnapshot};

const HOST_STATE_FIELDS: &[&str] = &["host_name", "current_state"];
const SERVICE_STATE_FIELDS: &[&str] = &["host_name", "service_description", "current_state"];

/// `/status`: host names, per-host state, or the whole snapshot.
pub(super) fn all(status: &StatusSnapshot, mode: OutputMode) -> Value {
    match mode {
        OutputMode::List => names(status.keys()),
        OutputMode::State => Value::Object(
            status
                .iter()
                .map(|(name, host)| (name.clone(), extract(&host.hoststatus, HOST_STATE_FIELDS)))
                .collect(),
        ),
        OutputMode::Full => Value::Object(
            status
                .iter()
                .map(|(name, host)| (name.clone(), host.to_value()))
                .collect(),
        ),
    }
}

/// `/status/{host}`: host state or the full `hoststatus` record.
pub(super) fn host(status: &StatusSnapshot, host: &str, mode: OutputMode) -> Option<Value> {
    let record = &status.get(host)?.hoststatus;
    Some(match mode {
        OutputMode::State => extract(record, HOST_STATE_FIELDS),
        OutputMode::List | OutputMode::Full => fields_to_value(record),
    })
}

/// `/status/{host}/services`: service names, per-service state, or every
/// service record of the host.
pub(super) fn services(status: &StatusSnapshot, host: &str, mode: OutputMode) -> Option<Value> {
    let services = &status.get(host)?.servicestatus;
    Some(match mode {
        OutputMode::List => names(services.keys()),
        OutputMode::State => Value::Object(
            services
                .iter()
                .map(|(name, record)| (name.clone(), extract(record, SERVICE_STATE_FIELDS)))
                .collect(),
        ),
        OutputMode::Full => Value::Object(
            services
                .iter()
                .map(|(name, record)| (name.clone(), fields_to_value(record)))
                .collect(),
        ),
    })
}

/// `/status/{host}/services/{service}`: service state or the full record.
pub(super) fn service(
    status: &StatusSnapshot,
    host: &str,
    service: &str,
    mode: OutputMode,
) -> Option<Value> {
    let record = status.get(host)?.servicestatus.get(service)?;
    Some(match mode {
        OutputMode::State => extract(record, SERVICE_STATE_FIELDS),
        OutputMode::List | OutputMode::Full => fields_to_value(record),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::fixtures::snapshots;
    use serde_json::json;

    #[test]
    fn test_host_names() {
        let snapshots = snapshots();
        assert_eq!(all(&snapshots.status, OutputMode::List), json!(["db01", "web01"]));
    }

    #[test]
    fn test_all_hosts_state() {
        let snapshots = snapshots();
        assert_eq!(
            all(&snapshots.status, OutputMode::State),
            json!({
                "db01": {"host_name": "db01", "current_state": 1},
                "web01": {"host_name": "web01", "current_state": 0}
            })
        );
    }

    #[test]
    fn test_all_hosts_full() {
        let snapshots = snapshots();
        let value = all(&snapshots.status, OutputMode::Full);
        assert_eq!(value["web01"]["hoststatus"]["plugin_output"], json!("PING OK"));
        assert_eq!(value["web01"]["servicestatus"]["http"]["current_state"], json!(2));
        assert_eq!(value["db01"]["servicestatus"], json!({}));
    }

    #[test]
    fn test_single_host() {
        let snapshots = snapshots();
        assert_eq!(
            host(&snapshots.status, "db01", OutputMode::State),
            Some(json!({"host_name": "db01", "current_state": 1}))
        );
        assert_eq!(
            host(&snapshots.status, "db01", OutputMode::Full),
            host(&snapshots.status, "db01", OutputMode::List)
        );
        assert_eq!(host(&snapshots.status, "WEB01", OutputMode::Full), None);
    }

    #[test]
    fn test_services_of_host() {
        let snapshots = snapshots();
        assert_eq!(
            services(&snapshots.status, "web01", OutputMode::List),
            Some(json!(["http", "ssh"]))
        );
        assert_eq!(
            services(&snapshots.status, "web01", OutputMode::State),
            Some(json!({
                "http": {"host_name": "web01", "service_description": "http", "current_state": 2},
                "ssh": {"host_name": "web01", "service_description": "ssh", "current_state": 0}
            }))
        );
        assert_eq!(services(&snapshots.status, "mail01", OutputMode::Full), None);
    }

    #[test]
    fn test_service_state_uses_record_field_names() {
        let snapshots = snapshots();
        assert_eq!(
            service(&snapshots.status, "web01", "http", OutputMode::State),
            Some(json!({"host_name": "web01", "service_description": "http", "current_state": 2}))
        );
    }

    #[test]
    fn test_service_lookup_misses() {
        let snapshots = snapshots();
        assert_eq!(service(&snapshots.status, "web01", "smtp", OutputMode::Full), None);
        assert_eq!(service(&snapshots.status, "mail01", "http", OutputMode::State), None);
    }

    #[test]
    fn test_service_full_record() {
        let snapshots = snapshots();
        let value = service(&snapshots.status, "web01", "http", OutputMode::List).unwrap();
        assert_eq!(value["plugin_output"], json!("CRITICAL"));
    }
}
