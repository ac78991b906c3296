//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::format::Format;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NagiraConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Locations of the monitoring daemon's snapshot files.
    pub sources: SourceConfig,

    /// When the parsed snapshots are rebuilt.
    pub refresh: RefreshConfig,

    /// Response formatting.
    pub output: OutputConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:4567").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4567".to_string(),
        }
    }
}

/// Snapshot file locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the live status dump (`status.dat`).
    pub status_path: String,

    /// Path to the object definition cache (`objects.cache`).
    pub objects_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            status_path: "/var/cache/nagios3/status.dat".to_string(),
            objects_path: "/var/cache/nagios3/objects.cache".to_string(),
        }
    }
}

/// Snapshot refresh policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Parse both files on every request.
    PerRequest,
    /// Reparse on request once the cached snapshot is older than `ttl_secs`.
    Ttl,
    /// Reparse when either file changes on disk.
    #[default]
    Watch,
}

/// Refresh configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub policy: RefreshPolicy,

    /// Maximum snapshot age in seconds for the `ttl` policy.
    pub ttl_secs: u64,

    /// Poll interval in seconds for the file watcher's fallback backend.
    pub poll_interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            policy: RefreshPolicy::Watch,
            ttl_secs: 10,
            poll_interval_secs: 2,
        }
    }
}

/// Response formatting configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when the path carries no `.json|.yaml|.xml` suffix.
    pub default_format: Format,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: NagiraConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:4567");
        assert_eq!(config.refresh.policy, RefreshPolicy::Watch);
        assert_eq!(config.output.default_format, Format::Xml);
    }

    #[test]
    fn test_partial_sections() {
        let config: NagiraConfig = toml::from_str(
            r#"
            [refresh]
            policy = "per_request"

            [output]
            default_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.refresh.policy, RefreshPolicy::PerRequest);
        assert_eq!(config.refresh.ttl_secs, 10);
        assert_eq!(config.output.default_format, Format::Json);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<NagiraConfig, _> = toml::from_str("[refresh]\npolicy = \"sometimes\"\n");
        assert!(result.is_err());
    }
}
