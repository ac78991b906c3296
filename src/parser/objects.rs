//! `objects.cache` parser.

use std::collections::BTreeMap;

use crate::parser::blocks::{parse_blocks, Block, Grammar};
use crate::parser::status::typed_fields;
use crate::parser::ParseError;
use crate::snapshot::model::ObjectSnapshot;

/// Parse the contents of an `objects.cache` file into objects by class.
///
/// Objects are named by their `<class>_name` field, falling back to
/// `name`. Services are named `<host_name>:<service_description>`.
/// Objects with no usable name (escalations, dependencies) are named
/// `<class>_<n>` by their 1-based position within the class.
pub fn parse_objects(input: &str) -> Result<ObjectSnapshot, ParseError> {
    let mut objects = ObjectSnapshot::new();
    let mut ordinals: BTreeMap<String, usize> = BTreeMap::new();

    for block in parse_blocks(input, Grammar::Objects)? {
        let ordinal = ordinals.entry(block.kind.clone()).or_default();
        *ordinal += 1;
        let name = object_name(&block).unwrap_or_else(|| format!("{}_{}", block.kind, ordinal));

        let fields = typed_fields(&block);
        let class = objects.entry(block.kind).or_default();
        if class.insert(name.clone(), fields).is_some() {
            tracing::warn!(line = block.line, name = %name, "duplicate object definition, keeping the last one");
        }
    }

    Ok(objects)
}

fn object_name(block: &Block) -> Option<String> {
    if block.kind == "service" {
        if let (Some(host), Some(service)) =
            (block.raw("host_name"), block.raw("service_description"))
        {
            return Some(format!("{host}:{service}"));
        }
    }
    block
        .raw(&format!("{}_name", block.kind))
        .or_else(|| block.raw("name"))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const OBJECTS: &str = "\
########################################
#       NAGIOS OBJECT CACHE FILE
########################################

define host {
\thost_name\tweb01
\talias\tWeb Server 01
\taddress\t10.0.0.5
\tmax_check_attempts\t3
\t}

define hostgroup {
\thostgroup_name\twebservers
\tmembers\tweb01,web02
\t}

define service {
\thost_name\tweb01
\tservice_description\tHTTP
\tcheck_command\tcheck_http
\t}

define hostescalation {
\thost_name\tweb01
\tfirst_notification\t2
\t}

define hostescalation {
\thost_name\tweb02
\tfirst_notification\t3
\t}
";

    #[test]
    fn test_classes_and_names() {
        let objects = parse_objects(OBJECTS).unwrap();

        let classes: Vec<&String> = objects.keys().collect();
        assert_eq!(classes, ["host", "hostescalation", "hostgroup", "service"]);
        assert_eq!(objects["host"]["web01"]["alias"], json!("Web Server 01"));
        assert_eq!(objects["host"]["web01"]["max_check_attempts"], json!(3));
        assert_eq!(objects["hostgroup"]["webservers"]["members"], json!("web01,web02"));
    }

    #[test]
    fn test_service_naming() {
        let objects = parse_objects(OBJECTS).unwrap();
        assert_eq!(
            objects["service"]["web01:HTTP"]["check_command"],
            json!("check_http")
        );
    }

    #[test]
    fn test_unnamed_objects_use_ordinal() {
        let objects = parse_objects(OBJECTS).unwrap();
        let escalations = &objects["hostescalation"];

        assert_eq!(escalations.len(), 2);
        assert_eq!(escalations["hostescalation_1"]["host_name"], json!("web01"));
        assert_eq!(escalations["hostescalation_2"]["first_notification"], json!(3));
    }

    #[test]
    fn test_template_name_fallback() {
        let objects =
            parse_objects("define contact {\n\tname\tgeneric-contact\n\tregister\t0\n}\n").unwrap();
        assert!(objects["contact"].contains_key("generic-contact"));
    }

    #[test]
    fn test_timeperiod_date_exceptions() {
        let objects = parse_objects(
            "define timeperiod {\n\ttimeperiod_name\tholidays\n\tmonday\t00:00-24:00\n\t2024-12-25\t00:00-24:00\n\t}\n",
        )
        .unwrap();

        let holidays = &objects["timeperiod"]["holidays"];
        assert_eq!(holidays["monday"], json!("00:00-24:00"));
        assert_eq!(holidays["2024-12-25"], json!("00:00-24:00"));
    }

    #[test]
    fn test_syntax_error_line() {
        let err = parse_objects("define host {\n\thost_name web01\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }
}
