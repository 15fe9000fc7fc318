//! unit-metrics — metric catalog and scrape-cycle collection.
//!
//! The core of the exporter: builds the descriptor catalog once from an
//! initial status snapshot, then maps every fresh snapshot onto those
//! descriptors during scrape cycles.
//!
//! # Architecture
//!
//! ```text
//! MetricCatalog (built once, immutable)
//!   ├── descriptors() → schema advertisement
//!   └── descriptor_for() → per-application lookup
//!
//! UnitCollector
//!   └── collect() → StatusSource::fetch() → Vec<Sample>
//!
//! Exposition
//!   └── render_text() → text/plain for /metrics
//! ```

pub mod catalog;
pub mod collector;
pub mod exposition;

pub use catalog::{AppMetricField, MetricCatalog, MetricDescriptor, MetricKind};
pub use collector::{CollectError, Sample, UnitCollector};
pub use exposition::render_text;
