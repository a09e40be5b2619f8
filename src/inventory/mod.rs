//! Platform inventory subsystem.
//!
//! # Data Flow
//! ```text
//! Lookup engine
//!     → Inventory trait (capability seam)
//!     → client.rs (Cloud Controller v3 over HTTP)
//!     → wire.rs (JSON shapes, converted into types.rs entities)
//! ```
//!
//! # Design Decisions
//! - Read-only: nothing here creates or mutates platform state
//! - List calls are exhaustive (all pages are followed)
//! - No caching; every lookup re-reads the inventory

pub mod client;
pub mod types;
mod wire;

use std::future::Future;

pub use client::CloudControllerClient;
pub use types::{
    Application, Destination, Domain, InventoryError, InventoryResult, Organization, Route, Space,
    WILDCARD_HOST,
};

/// Read access to the domain/route/app/space inventory.
pub trait Inventory: Send + Sync {
    /// Domains whose name is exactly `name`.
    fn lookup_domains_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = InventoryResult<Vec<Domain>>> + Send;

    /// Routes on `domain_guid` with `path` whose host is any of `hosts`.
    /// `hosts` may contain [`WILDCARD_HOST`].
    fn lookup_routes(
        &self,
        hosts: &[&str],
        domain_guid: &str,
        path: &str,
    ) -> impl Future<Output = InventoryResult<Vec<Route>>> + Send;

    /// Bulk fetch of applications. Callers keep `guids` within the batch limit.
    /// Unknown guids are simply absent from the result.
    fn fetch_applications_by_ids(
        &self,
        guids: &[String],
    ) -> impl Future<Output = InventoryResult<Vec<Application>>> + Send;

    /// A space together with the organization that owns it.
    fn fetch_space_with_organization(
        &self,
        space_guid: &str,
    ) -> impl Future<Output = InventoryResult<(Space, Organization)>> + Send;
}
