//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NagiraConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{NagiraConfig, RefreshPolicy};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a deserialized configuration.
pub fn validate_config(config: &NagiraConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut fail = |field: &'static str, message: String| {
        errors.push(ValidationError { field, message });
    };

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        fail(
            "listener.bind_address",
            format!("`{}` is not a socket address", config.listener.bind_address),
        );
    }
    if config.sources.status_path.trim().is_empty() {
        fail("sources.status_path", "must not be empty".to_string());
    }
    if config.sources.objects_path.trim().is_empty() {
        fail("sources.objects_path", "must not be empty".to_string());
    }
    if config.refresh.policy == RefreshPolicy::Ttl && config.refresh.ttl_secs == 0 {
        fail("refresh.ttl_secs", "must be greater than 0 for the ttl policy".to_string());
    }
    if config.refresh.poll_interval_secs == 0 {
        fail("refresh.poll_interval_secs", "must be greater than 0".to_string());
    }
    if config.timeouts.request_secs == 0 {
        fail("timeouts.request_secs", "must be greater than 0".to_string());
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        fail(
            "observability.metrics_address",
            format!("`{}` is not a socket address", config.observability.metrics_address),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
