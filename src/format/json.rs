//! JSON encoder.

use serde_json::Value;

use super::{EncodeError, Encoder};

/// Compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(value)?)
    }
}
