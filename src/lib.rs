//! Resolve a route URL to the Cloud Foundry organization, space and
//! applications it is bound to.

pub mod config;
pub mod inventory;
pub mod lookup;
pub mod observability;
pub mod report;

pub use config::LookupConfig;
pub use inventory::{CloudControllerClient, Inventory};
pub use lookup::{Binding, LookupError, RouteLookup};
