//! Inventory entities and error definitions.

use serde::Serialize;
use thiserror::Error;

/// Host filter value that matches any subdomain.
pub const WILDCARD_HOST: &str = "*";

/// A registered domain (DNS suffix) in the platform inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub guid: String,
    pub name: String,
}

/// A route: host fragment + domain + path, bound to zero or more apps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub guid: String,
    /// Host fragment. Empty for apex routes, `*` for wildcard routes.
    pub host: String,
    pub path: String,
    pub domain_guid: String,
    /// Canonical URL as reported by the API, if any.
    pub url: Option<String>,
    pub destinations: Vec<Destination>,
}

impl Route {
    /// Returns true if this route matches any subdomain.
    pub fn is_wildcard(&self) -> bool {
        self.host == WILDCARD_HOST
    }

    /// Application guids in destination order.
    pub fn app_guids(&self) -> impl Iterator<Item = &str> {
        self.destinations.iter().map(|d| d.app_guid.as_str())
    }
}

/// Binding of a route to one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub guid: String,
    pub app_guid: String,
}

/// An application. Always lives in exactly one space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub guid: String,
    pub name: String,
    pub state: String,
    #[serde(skip)]
    pub space_guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Space {
    pub guid: String,
    pub name: String,
    #[serde(skip)]
    pub organization_guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub guid: String,
    pub name: String,
}

/// Errors raised while talking to the inventory API.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Transport failure (connect, timeout, TLS, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("API returned status {status} for {url}: {detail}")]
    Status {
        url: String,
        status: u16,
        detail: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A space was returned without its included organization.
    #[error("space {0} was returned without its organization")]
    MissingOrganization(String),

    /// The configured API endpoint is unusable.
    #[error("invalid API endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;
