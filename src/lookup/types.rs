//! Lookup results and error definitions.

use serde::Serialize;
use thiserror::Error;

use crate::inventory::{Application, Domain, InventoryError, Organization, Route, Space};

/// A hostname resolved against the registered domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatch {
    pub domain: Domain,
    /// Host fragment in front of the domain. Empty when the whole hostname
    /// is itself a registered domain.
    pub host: String,
}

/// Applications behind a route together with their shared org and space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrichment {
    pub organization: Organization,
    pub space: Space,
    /// In the route's destination order.
    pub applications: Vec<Application>,
}

/// Successful result of a full lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub query: String,
    pub route: Route,
    pub organization: Organization,
    pub space: Space,
    pub applications: Vec<Application>,
}

/// Errors that end a lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The query is not an absolute URL with a host.
    #[error("please provide the url including the scheme: '{query}' ({reason})")]
    MalformedQuery { query: String, reason: String },

    /// The hostname has no dot, so no registered domain can be a suffix of it.
    #[error("'{0}' is not a domain")]
    NotADomain(String),

    /// Neither the hostname nor its parent is a registered domain.
    #[error("route not found, domain '{0}' is unknown")]
    UnknownDomain(String),

    /// No exact-host or wildcard route matched.
    #[error("route '{0}' not found")]
    RouteNotFound(String),

    /// The route has no (remaining) application destinations.
    #[error("route not bound to any applications")]
    RouteUnbound,

    /// An application batch or the space/organization fetch failed.
    #[error("failed to retrieve bound applications: {0}")]
    EnrichmentFailed(#[source] InventoryError),

    /// Domain or route lookup failed at the API level.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;
