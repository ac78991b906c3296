//! `status.dat` parser.

use crate::parser::blocks::{parse_blocks, Block, Grammar};
use crate::parser::value::typed;
use crate::parser::ParseError;
use crate::snapshot::model::{FieldMap, StatusSnapshot};

/// Parse the contents of a `status.dat` file into per-host status.
///
/// `hoststatus` blocks are keyed by `host_name`; `servicestatus` blocks
/// attach to their `host_name` keyed by `service_description`. Other
/// block kinds (`info`, `programstatus`, `contactstatus`, ...) are
/// ignored.
pub fn parse_status(input: &str) -> Result<StatusSnapshot, ParseError> {
    let mut hosts = StatusSnapshot::new();

    for block in parse_blocks(input, Grammar::Status)? {
        match block.kind.as_str() {
            "hoststatus" => {
                let Some(host) = block.raw("host_name").map(str::to_string) else {
                    tracing::warn!(line = block.line, "hoststatus block without host_name, skipping");
                    continue;
                };
                hosts.entry(host).or_default().hoststatus = typed_fields(&block);
            }
            "servicestatus" => {
                let (Some(host), Some(service)) = (
                    block.raw("host_name").map(str::to_string),
                    block.raw("service_description").map(str::to_string),
                ) else {
                    tracing::warn!(
                        line = block.line,
                        "servicestatus block without host_name or service_description, skipping"
                    );
                    continue;
                };
                hosts
                    .entry(host)
                    .or_default()
                    .servicestatus
                    .insert(service, typed_fields(&block));
            }
            _ => {}
        }
    }

    Ok(hosts)
}

pub(crate) fn typed_fields(block: &Block) -> FieldMap {
    block
        .fields
        .iter()
        .map(|(key, raw)| (key.clone(), typed(raw)))
        .collect()
}
