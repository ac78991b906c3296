//! Response serialization.
//!
//! # Data Flow
//! ```text
//! projected Value
//!     → Format (resolved from path suffix or configured default)
//!     → Encoder (json.rs / yaml.rs / xml.rs)
//!     → body bytes + content type
//! ```
//!
//! # Design Decisions
//! - Encoders are selected by enum, never by name
//! - Input is always an acyclic `serde_json::Value`
//! - Mapping keys come out sorted, so identical input yields identical bytes

mod json;
mod xml;
mod yaml;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use json::JsonEncoder;
pub use xml::XmlEncoder;
pub use yaml::YamlEncoder;

/// Serialization format of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    #[default]
    Xml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Yaml, Format::Xml];

    /// Path extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Yaml => "application/yaml",
            Format::Xml => "application/xml",
        }
    }

    pub fn encoder(self) -> &'static dyn Encoder {
        match self {
            Format::Json => &JsonEncoder,
            Format::Yaml => &YamlEncoder,
            Format::Xml => &XmlEncoder,
        }
    }

    /// Encode `value` in this format.
    pub fn encode(self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.encoder().encode(value)
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.extension() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// A format name outside `json`, `yaml` and `xml`.
#[derive(Debug, thiserror::Error)]
#[error("unknown format `{0}`, expected json, yaml or xml")]
pub struct UnknownFormat(pub String);

/// Serializer for one response format.
pub trait Encoder: Send + Sync {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError>;
}

/// Errors that can occur while encoding a response body.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML encoding failed: {0}")]
    Xml(String),
}
