//! Reporting and targeting.
//!
//! # Data Flow
//! ```text
//! Binding
//!     → reporter.rs (text or JSON to stdout)
//!     → target.rs (optional: make the org/space the active CLI target)
//! ```
//!
//! # Design Decisions
//! - The lookup engine never depends on this module
//! - A failed context switch is a warning; the report already printed stands

pub mod reporter;
pub mod target;

pub use reporter::{OutputFormat, Reporter, TargetOutcome};
pub use target::{CfCliTarget, ContextSwitchError, ContextSwitcher};
