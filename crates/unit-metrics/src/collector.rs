//! Scrape-cycle collector — maps fresh snapshots onto catalog descriptors.
//!
//! One `collect()` call is one scrape cycle: a single fetch, no retries,
//! no caching. A failed fetch yields zero samples and an error; it never
//! touches the catalog, so the next cycle starts clean.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use unit_status::{StatusError, StatusSource};

use crate::catalog::{AppMetricField, MetricCatalog, MetricDescriptor};

/// One (descriptor, value) pair produced during a scrape.
#[derive(Debug, Clone, Copy)]
pub struct Sample<'a> {
    pub descriptor: &'a MetricDescriptor,
    pub value: f64,
}

/// A single collection cycle failed to retrieve or decode a snapshot.
///
/// Non-fatal: the cycle yields zero samples and the next cycle starts
/// clean.
#[derive(Debug, Error)]
#[error("status fetch failed: {0}")]
pub struct CollectError(#[from] pub StatusError);

/// Orchestrates one scrape cycle: fetch, then map onto the catalog.
///
/// Safe under concurrent invocation: the catalog is read-only and every
/// call performs its own independent fetch.
pub struct UnitCollector {
    catalog: MetricCatalog,
    source: Arc<dyn StatusSource>,
}

impl UnitCollector {
    pub fn new(catalog: MetricCatalog, source: Arc<dyn StatusSource>) -> Self {
        Self { catalog, source }
    }

    /// The descriptor catalog backing this collector.
    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// Run one scrape cycle.
    ///
    /// On success emits the five global samples plus four samples for
    /// every application known to both the catalog and the fresh
    /// snapshot. An application that disappeared since startup is skipped
    /// for the cycle; one that appeared after startup is ignored (the
    /// catalog is immutable).
    pub async fn collect(&self) -> Result<Vec<Sample<'_>>, CollectError> {
        let snapshot = self.source.fetch().await?;

        let catalog = &self.catalog;
        let mut samples = vec![
            Sample {
                descriptor: &catalog.connections_accepted,
                value: snapshot.connections.accepted,
            },
            Sample {
                descriptor: &catalog.connections_active,
                value: snapshot.connections.active,
            },
            Sample {
                descriptor: &catalog.connections_idle,
                value: snapshot.connections.idle,
            },
            Sample {
                descriptor: &catalog.connections_closed,
                value: snapshot.connections.closed,
            },
            Sample {
                descriptor: &catalog.requests_total,
                value: snapshot.requests.total,
            },
        ];

        for app in catalog.application_names() {
            let Some(status) = snapshot.applications.get(app) else {
                debug!(application = app, "application missing from snapshot, skipping");
                continue;
            };

            let fields = [
                (AppMetricField::ProcessRunning, status.processes.running),
                (AppMetricField::ProcessStarting, status.processes.starting),
                (AppMetricField::ProcessIdle, status.processes.idle),
                (AppMetricField::RequestsActive, status.requests.active),
            ];
            for (field, value) in fields {
                // A lookup miss for a catalog-known name is a skip, never
                // an error surfaced to the scrape.
                let Some(descriptor) = catalog.descriptor_for(app, field) else {
                    continue;
                };
                samples.push(Sample { descriptor, value });
            }
        }

        Ok(samples)
    }
}
