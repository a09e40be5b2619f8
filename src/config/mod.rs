//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! lookup-route.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI flags override fields
//!     → cf_home.rs (fill endpoint/token from ~/.cf/config.json)
//!     → validation.rs (semantic checks)
//!     → LookupConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once finalized
//! - All fields have defaults to allow running with no config file
//! - Validation separates syntactic (serde) from semantic checks

pub mod cf_home;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{finalize_config, load_config, ConfigError};
pub use schema::{
    ApiConfig, LookupConfig, LookupSettings, ObservabilityConfig, TargetConfig, TimeoutConfig,
};
