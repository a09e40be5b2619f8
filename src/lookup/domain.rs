//! Domain resolution.
//!
//! # Responsibilities
//! - Decide which registered domain a hostname belongs to
//! - Separate the host fragment (subdomain) from that domain
//!
//! # Design Decisions
//! - Exact full-hostname match wins over treating the first label as a host
//! - Only one split point (the first dot) is ever tried: `a.b.example.com`
//!   resolves against `b.example.com`, never `example.com`

use crate::inventory::{Domain, Inventory};
use crate::lookup::types::{DomainMatch, LookupError, LookupResult};

/// Resolves hostnames against the registered domains.
#[derive(Debug)]
pub struct DomainResolver<'a, I> {
    inventory: &'a I,
}

impl<'a, I: Inventory> DomainResolver<'a, I> {
    pub fn new(inventory: &'a I) -> Self {
        Self { inventory }
    }

    /// Resolve `hostname` to a registered domain and host fragment.
    pub async fn resolve(&self, hostname: &str) -> LookupResult<DomainMatch> {
        let Some((fragment, parent)) = split_host(hostname) else {
            return Err(LookupError::NotADomain(hostname.to_string()));
        };

        if let Some(domain) = self.find_named(hostname).await? {
            tracing::debug!(domain = %domain.name, "Hostname is a registered domain");
            return Ok(DomainMatch {
                domain,
                host: String::new(),
            });
        }

        let Some(domain) = self.find_named(parent).await? else {
            return Err(LookupError::UnknownDomain(parent.to_string()));
        };

        tracing::debug!(domain = %domain.name, host = fragment, "Resolved host on domain");
        Ok(DomainMatch {
            domain,
            host: fragment.to_string(),
        })
    }

    /// Look up `name` and keep only a domain carrying exactly that name.
    ///
    /// The API treats commas in the filter as separators, so a hostname such
    /// as `a,b.example.com` can come back with `b.example.com`.
    async fn find_named(&self, name: &str) -> LookupResult<Option<Domain>> {
        let domains = self.inventory.lookup_domains_by_name(name).await?;
        Ok(domains.into_iter().find(|d| d.name == name))
    }
}

/// Split a hostname at its first dot into `(fragment, parent)`.
pub fn split_host(hostname: &str) -> Option<(&str, &str)> {
    hostname.split_once('.')
}
