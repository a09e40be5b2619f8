//! Cloud Controller v3 JSON shapes.
//!
//! Only the fields the lookup needs are modelled; everything else in the
//! payloads is ignored by serde.

use serde::Deserialize;

use crate::inventory::types::{
    Application, Destination, Domain, InventoryError, InventoryResult, Organization, Route, Space,
};

/// One page of a list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(default)]
    pub pagination: Pagination,
    pub resources: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default)]
    pub next: Option<Link>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Link {
    pub href: String,
}

/// `{"data": {"guid": "..."}}`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ToOne {
    #[serde(default)]
    pub data: Option<GuidRef>,
}

impl ToOne {
    fn guid(self) -> String {
        self.data.map(|d| d.guid).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GuidRef {
    pub guid: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DomainResource {
    pub guid: String,
    pub name: String,
}

impl From<DomainResource> for Domain {
    fn from(r: DomainResource) -> Self {
        Self {
            guid: r.guid,
            name: r.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteResource {
    pub guid: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub destinations: Vec<DestinationResource>,
    #[serde(default)]
    pub relationships: RouteRelationships,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RouteRelationships {
    #[serde(default)]
    pub domain: ToOne,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DestinationResource {
    pub guid: String,
    pub app: GuidRef,
}

impl From<RouteResource> for Route {
    fn from(r: RouteResource) -> Self {
        Self {
            guid: r.guid,
            host: r.host,
            path: r.path,
            domain_guid: r.relationships.domain.guid(),
            url: r.url,
            destinations: r
                .destinations
                .into_iter()
                .map(|d| Destination {
                    guid: d.guid,
                    app_guid: d.app.guid,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppResource {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub relationships: AppRelationships,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AppRelationships {
    #[serde(default)]
    pub space: ToOne,
}

impl From<AppResource> for Application {
    fn from(r: AppResource) -> Self {
        Self {
            guid: r.guid,
            name: r.name,
            state: r.state,
            space_guid: r.relationships.space.guid(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpaceResource {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub relationships: SpaceRelationships,
    #[serde(default)]
    pub included: Included,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SpaceRelationships {
    #[serde(default)]
    pub organization: ToOne,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Included {
    #[serde(default)]
    pub organizations: Vec<OrganizationResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationResource {
    pub guid: String,
    pub name: String,
}

impl SpaceResource {
    /// Split into the space and its included organization.
    pub fn into_space_with_organization(self) -> InventoryResult<(Space, Organization)> {
        let org_guid = self.relationships.organization.guid();
        let org = self
            .included
            .organizations
            .into_iter()
            .find(|o| org_guid.is_empty() || o.guid == org_guid)
            .ok_or_else(|| InventoryError::MissingOrganization(self.guid.clone()))?;

        let space = Space {
            guid: self.guid,
            name: self.name,
            organization_guid: org.guid.clone(),
        };
        Ok((
            space,
            Organization {
                guid: org.guid,
                name: org.name,
            },
        ))
    }
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorsBody {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl ErrorsBody {
    /// First error's detail (or title), if the body had one.
    pub fn first_detail(&self) -> Option<String> {
        self.errors.first().map(|e| {
            if e.detail.is_empty() {
                e.title.clone()
            } else {
                e.detail.clone()
            }
        })
    }
}
