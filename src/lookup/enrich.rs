//! Batched application enrichment.
//!
//! # Responsibilities
//! - Fetch every application bound to a route in bounded-size batches
//! - Fetch the one space/organization pair that owns them
//!
//! # Design Decisions
//! - Batches are consecutive slices of the destination order; exactly
//!   `batch_size` guids make one batch
//! - Fetches run through an order-preserving buffered stream; with a
//!   concurrency of 1 they are strictly sequential
//! - All-or-nothing: the first failed batch aborts, no partial result
//! - Only the first application's space is fetched; the platform guarantees
//!   every app behind one route shares it

use std::collections::{HashMap, HashSet};
use std::slice::Chunks;

use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::config::LookupSettings;
use crate::inventory::{Application, Inventory, InventoryError, Route};
use crate::lookup::types::{Enrichment, LookupError, LookupResult};

/// Fetches the applications and owning org/space for a route.
#[derive(Debug)]
pub struct Enricher<'a, I> {
    inventory: &'a I,
    batch_size: usize,
    concurrency: usize,
}

impl<'a, I: Inventory> Enricher<'a, I> {
    pub fn new(inventory: &'a I, settings: &LookupSettings) -> Self {
        Self {
            inventory,
            batch_size: settings.batch_size.max(1),
            concurrency: settings.max_concurrent_batches.max(1),
        }
    }

    pub async fn enrich(&self, route: &Route) -> LookupResult<Enrichment> {
        if route.destinations.is_empty() {
            return Err(LookupError::RouteUnbound);
        }

        let guids = distinct_app_guids(route);
        let total = batch_count(guids.len(), self.batch_size);
        tracing::debug!(
            route = %route.guid,
            apps = guids.len(),
            batches = total,
            "Fetching bound applications"
        );

        let fetched: Vec<Vec<Application>> = stream::iter(batches(&guids, self.batch_size).enumerate())
            .map(|(index, batch)| async move {
                tracing::debug!(batch = index + 1, total, size = batch.len(), "Fetching application batch");
                let apps = self.inventory.fetch_applications_by_ids(batch).await?;
                Ok::<_, InventoryError>(in_request_order(batch, apps))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
            .map_err(LookupError::EnrichmentFailed)?;

        let applications: Vec<Application> = fetched.into_iter().flatten().collect();
        let Some(first) = applications.first() else {
            tracing::warn!(route = %route.guid, "Bound applications no longer exist");
            return Err(LookupError::RouteUnbound);
        };

        let (space, organization) = self
            .inventory
            .fetch_space_with_organization(&first.space_guid)
            .await
            .map_err(LookupError::EnrichmentFailed)?;

        Ok(Enrichment {
            organization,
            space,
            applications,
        })
    }
}

/// Consecutive batches of at most `size` guids.
pub fn batches(guids: &[String], size: usize) -> Chunks<'_, String> {
    guids.chunks(size.max(1))
}

/// Number of batches `count` guids split into.
pub fn batch_count(count: usize, size: usize) -> usize {
    count.div_ceil(size.max(1))
}

/// App guids in destination order. A route can reach the same app through
/// several destinations (ports, process types); each app is fetched once.
fn distinct_app_guids(route: &Route) -> Vec<String> {
    let mut seen = HashSet::new();
    route
        .app_guids()
        .filter(|guid| seen.insert(*guid))
        .map(str::to_string)
        .collect()
}

/// Reorder a batch response to match the requested guid order.
/// Guids the API did not return (deleted apps) are dropped.
fn in_request_order(requested: &[String], apps: Vec<Application>) -> Vec<Application> {
    let mut by_guid: HashMap<String, Application> =
        apps.into_iter().map(|app| (app.guid.clone(), app)).collect();

    requested
        .iter()
        .filter_map(|guid| {
            let app = by_guid.remove(guid);
            if app.is_none() {
                tracing::debug!(app = %guid, "Application not found, skipping");
            }
            app
        })
        .collect()
}
