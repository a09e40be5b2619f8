//! Route lookup engine.
//!
//! # Data Flow
//! ```text
//! Query URL
//!     → query.rs (scheme/host/path)
//!     → domain.rs (registered domain + host fragment)
//!     → route.rs (exact host, then wildcard)
//!     → enrich.rs (app batches, then owning space/org)
//!     → Binding or LookupError
//! ```
//!
//! # Design Decisions
//! - Stateless: every lookup re-reads the inventory
//! - Deterministic: same inventory, same query, same result
//! - First failure ends the lookup; nothing is retried

pub mod domain;
pub mod enrich;
pub mod query;
pub mod route;
pub mod types;

use tracing::Instrument;
use uuid::Uuid;

use crate::config::LookupSettings;
use crate::inventory::Inventory;

pub use domain::DomainResolver;
pub use enrich::Enricher;
pub use query::RouteQuery;
pub use route::RouteResolver;
pub use types::{Binding, DomainMatch, Enrichment, LookupError, LookupResult};

/// Runs the full query → binding pipeline against an inventory.
#[derive(Debug)]
pub struct RouteLookup<I> {
    inventory: I,
    settings: LookupSettings,
}

impl<I: Inventory> RouteLookup<I> {
    pub fn new(inventory: I, settings: LookupSettings) -> Self {
        Self {
            inventory,
            settings,
        }
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Resolve `query` to its route, applications, space and organization.
    pub async fn lookup(&self, query: &str) -> LookupResult<Binding> {
        let span = tracing::info_span!("lookup", lookup_id = %Uuid::new_v4(), query);
        self.run(query).instrument(span).await
    }

    async fn run(&self, raw: &str) -> LookupResult<Binding> {
        let query = RouteQuery::parse(raw)?;

        let matched = DomainResolver::new(&self.inventory)
            .resolve(query.hostname())
            .await?;

        let route = RouteResolver::new(&self.inventory)
            .resolve(&matched, query.path(), query.hostname())
            .await?;
        tracing::debug!(route = %route.guid, destinations = route.destinations.len(), "Route found");

        let enrichment = Enricher::new(&self.inventory, &self.settings)
            .enrich(&route)
            .await?;

        tracing::info!(
            route = %route.guid,
            organization = %enrichment.organization.name,
            space = %enrichment.space.name,
            apps = enrichment.applications.len(),
            "Route resolved"
        );

        Ok(Binding {
            query: query.raw().to_string(),
            route,
            organization: enrichment.organization,
            space: enrichment.space,
            applications: enrichment.applications,
        })
    }
}
