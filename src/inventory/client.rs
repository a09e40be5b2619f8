//! Cloud Controller v3 client.
//!
//! # Responsibilities
//! - Build authenticated, timeout-bounded requests against the API endpoint
//! - Follow pagination for list endpoints
//! - Map HTTP and decoding failures into [`InventoryError`]

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::LookupConfig;
use crate::inventory::types::{
    Application, Domain, InventoryError, InventoryResult, Organization, Route, Space,
};
use crate::inventory::wire::{
    AppResource, DomainResource, ErrorsBody, Page, RouteResource, SpaceResource,
};
use crate::inventory::Inventory;

/// Longest slice of an unparseable error body echoed back in errors.
const MAX_ERROR_BODY: usize = 200;

/// HTTP implementation of [`Inventory`].
#[derive(Clone)]
pub struct CloudControllerClient {
    http: reqwest::Client,
    /// API root, always without a trailing slash.
    endpoint: String,
    per_page: usize,
}

impl CloudControllerClient {
    /// Create a client from a resolved configuration.
    ///
    /// The endpoint must be set and be an absolute http(s) URL.
    pub fn new(config: &LookupConfig) -> InventoryResult<Self> {
        let raw = config.api.endpoint.as_deref().unwrap_or_default();
        let endpoint = parse_endpoint(raw)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        match config.api.access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {
                let mut value = HeaderValue::from_str(&bearer(token)).map_err(|e| {
                    InventoryError::InvalidEndpoint {
                        endpoint: raw.to_string(),
                        reason: format!("access token is not a valid header value: {e}"),
                    }
                })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            _ => tracing::warn!("No access token configured, requests will be anonymous"),
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .danger_accept_invalid_certs(config.api.skip_ssl_validation);
        if config.api.no_proxy {
            builder = builder.no_proxy();
        }

        let http = builder
            .build()
            .map_err(|source| InventoryError::Transport {
                url: endpoint.clone(),
                source,
            })?;

        tracing::debug!(
            endpoint = %endpoint,
            per_page = config.lookup.batch_size,
            "Inventory client initialized"
        );

        Ok(Self {
            http,
            endpoint,
            per_page: config.lookup.batch_size,
        })
    }

    /// API root this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> InventoryResult<Url> {
        let full = format!("{}{}", self.endpoint, path);
        Url::parse(&full).map_err(|e| InventoryError::InvalidEndpoint {
            endpoint: full,
            reason: e.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> InventoryResult<T> {
        let url_str = url.to_string();
        tracing::debug!(url = %url_str, "GET");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| InventoryError::Transport {
                url: url_str.clone(),
                source,
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|source| InventoryError::Transport {
                url: url_str.clone(),
                source,
            })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorsBody>(&body)
                .ok()
                .and_then(|e| e.first_detail())
                .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect());
            return Err(InventoryError::Status {
                url: url_str,
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|source| InventoryError::Decode {
            url: url_str,
            source,
        })
    }

    /// Fetch every page of a list endpoint.
    async fn list_all<T: DeserializeOwned>(&self, first: Url) -> InventoryResult<Vec<T>> {
        let mut resources = Vec::new();
        let mut next = Some(first);

        while let Some(url) = next.take() {
            let page: Page<T> = self.get_json(url).await?;
            resources.extend(page.resources);

            if let Some(link) = page.pagination.next {
                next = Some(Url::parse(&link.href).map_err(|e| {
                    InventoryError::InvalidEndpoint {
                        endpoint: link.href.clone(),
                        reason: format!("bad pagination link: {e}"),
                    }
                })?);
            }
        }

        Ok(resources)
    }
}

impl Inventory for CloudControllerClient {
    async fn lookup_domains_by_name(&self, name: &str) -> InventoryResult<Vec<Domain>> {
        let mut url = self.url("/v3/domains")?;
        url.query_pairs_mut().append_pair("names", name);

        let domains: Vec<DomainResource> = self.list_all(url).await?;
        Ok(domains.into_iter().map(Domain::from).collect())
    }

    async fn lookup_routes(
        &self,
        hosts: &[&str],
        domain_guid: &str,
        path: &str,
    ) -> InventoryResult<Vec<Route>> {
        let mut url = self.url("/v3/routes")?;
        url.query_pairs_mut()
            .append_pair("hosts", &hosts.join(","))
            .append_pair("domain_guids", domain_guid)
            .append_pair("paths", path);

        let routes: Vec<RouteResource> = self.list_all(url).await?;
        Ok(routes.into_iter().map(Route::from).collect())
    }

    async fn fetch_applications_by_ids(&self, guids: &[String]) -> InventoryResult<Vec<Application>> {
        let mut url = self.url("/v3/apps")?;
        url.query_pairs_mut()
            .append_pair("guids", &guids.join(","))
            .append_pair("per_page", &self.per_page.to_string());

        let apps: Vec<AppResource> = self.list_all(url).await?;
        Ok(apps.into_iter().map(Application::from).collect())
    }

    async fn fetch_space_with_organization(
        &self,
        space_guid: &str,
    ) -> InventoryResult<(Space, Organization)> {
        let mut url = self.url(&format!("/v3/spaces/{space_guid}"))?;
        url.query_pairs_mut().append_pair("include", "organization");

        let space: SpaceResource = self.get_json(url).await?;
        space.into_space_with_organization()
    }
}

impl std::fmt::Debug for CloudControllerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudControllerClient")
            .field("endpoint", &self.endpoint)
            .field("per_page", &self.per_page)
            .finish()
    }
}

fn parse_endpoint(raw: &str) -> InventoryResult<String> {
    let invalid = |reason: &str| InventoryError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason: reason.to_string(),
    };

    if raw.trim().is_empty() {
        return Err(invalid("no API endpoint set"));
    }
    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// The CF CLI stores tokens as `bearer <jwt>`; accept either form.
fn bearer(token: &str) -> String {
    let token = token.trim();
    if token.len() > 7 && token.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("bearer ")) {
        token.to_string()
    } else {
        format!("bearer {token}")
    }
}
