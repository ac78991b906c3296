//! YAML encoder.

use serde_json::Value;

use super::{EncodeError, Encoder};

/// Block-style YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

impl Encoder for YamlEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_yaml::to_string(value)?.into_bytes())
    }
}
