//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, batch size within the API limit)
//! - Check the API endpoint is present and usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LookupConfig → Result<(), Vec<ValidationError>>
//! - Runs after CLI and CF CLI overrides are merged, before any API call

use std::fmt;

use crate::config::schema::{LookupConfig, MAX_BATCH_SIZE};

/// Upper bound on concurrent batch fetches.
pub const MAX_CONCURRENT_BATCHES: usize = 16;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. "lookup.batch_size".
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &LookupConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.api.endpoint.as_deref().map(str::trim) {
        None | Some("") => errors.push(ValidationError::new("api.endpoint", "no API endpoint set")),
        Some(endpoint) => match url::Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "api.endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new("api.endpoint", e.to_string())),
        },
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if !(1..=MAX_BATCH_SIZE).contains(&config.lookup.batch_size) {
        errors.push(ValidationError::new(
            "lookup.batch_size",
            format!("must be between 1 and {MAX_BATCH_SIZE}"),
        ));
    }
    if !(1..=MAX_CONCURRENT_BATCHES).contains(&config.lookup.max_concurrent_batches) {
        errors.push(ValidationError::new(
            "lookup.max_concurrent_batches",
            format!("must be between 1 and {MAX_CONCURRENT_BATCHES}"),
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if config.target.cf_binary.trim().is_empty() {
        errors.push(ValidationError::new("target.cf_binary", "must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
