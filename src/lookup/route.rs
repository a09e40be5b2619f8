//! Route resolution with wildcard fallback.

use crate::inventory::{Inventory, Route, WILDCARD_HOST};
use crate::lookup::types::{DomainMatch, LookupError, LookupResult};

/// Finds the route for a resolved domain, host fragment and path.
#[derive(Debug)]
pub struct RouteResolver<'a, I> {
    inventory: &'a I,
}

impl<'a, I: Inventory> RouteResolver<'a, I> {
    pub fn new(inventory: &'a I) -> Self {
        Self { inventory }
    }

    /// Look up the route, trying the exact host first and only then
    /// `[host, *]`. The first route in inventory order is returned.
    ///
    /// `hostname` is only used to name the route in a `RouteNotFound` error.
    pub async fn resolve(
        &self,
        matched: &DomainMatch,
        path: &str,
        hostname: &str,
    ) -> LookupResult<Route> {
        let host = matched.host.as_str();
        let domain_guid = matched.domain.guid.as_str();

        let routes = self
            .inventory
            .lookup_routes(&[host], domain_guid, path)
            .await?;
        if let Some(route) = routes.into_iter().next() {
            return Ok(route);
        }

        tracing::debug!(host, path, "No exact route, trying wildcard");
        let routes = self
            .inventory
            .lookup_routes(&[host, WILDCARD_HOST], domain_guid, path)
            .await?;

        let route = routes
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::RouteNotFound(hostname.to_string()))?;

        if route.is_wildcard() {
            tracing::debug!(route = %route.guid, "Matched wildcard route");
        }
        Ok(route)
    }
}
