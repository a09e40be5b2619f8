//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields: route, batch, app)
//!     → one `lookup` span per query, tagged with a lookup id
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, human or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
