//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the lookup
//! tool. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Largest `per_page` the Cloud Controller accepts, and so the largest batch.
pub const MAX_BATCH_SIZE: usize = 5000;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LookupConfig {
    /// API endpoint and credentials.
    pub api: ApiConfig,

    /// Transport timeouts.
    pub timeouts: TimeoutConfig,

    /// Resolution engine tuning.
    pub lookup: LookupSettings,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Context switching (`-t`) settings.
    pub target: TargetConfig,
}

/// API endpoint and credentials.
///
/// Unset fields are filled from the CF CLI config when available.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, e.g. "https://api.sys.example.com".
    pub endpoint: Option<String>,

    /// OAuth access token, with or without the "bearer " prefix.
    pub access_token: Option<String>,

    /// Accept invalid TLS certificates.
    pub skip_ssl_validation: bool,

    /// Ignore `HTTP(S)_PROXY` from the environment.
    pub no_proxy: bool,

    /// Directory holding `.cf/config.json`. Defaults to `$CF_HOME`, then `$HOME`.
    pub cf_home: Option<String>,
}

/// Timeout configuration for API calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time for one request/response in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Resolution engine settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Maximum application guids per bulk fetch.
    pub batch_size: usize,

    /// How many batch fetches may be in flight at once (1 = sequential).
    pub max_concurrent_batches: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            batch_size: 50,
            max_concurrent_batches: 1,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
        }
    }
}

/// Settings for switching the CLI's active org/space.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Executable invoked as `<cf_binary> target -o ORG -s SPACE`.
    pub cf_binary: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            cf_binary: "cf".to_string(),
        }
    }
}
