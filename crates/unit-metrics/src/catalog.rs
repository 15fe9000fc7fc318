//! Metric catalog — the stable descriptor set built at startup.
//!
//! The catalog is constructed once from the first successful status
//! snapshot and never mutated: five global connection/request descriptors
//! plus four descriptors for every application discovered at construction
//! time. An application appearing in a later snapshot is ignored; one
//! disappearing later fails lookup and is skipped for that cycle.

use std::collections::BTreeMap;

use unit_status::StatusSnapshot;

/// Whether a metric is a monotonically-increasing counter or a
/// point-in-time gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    /// Exposition-format type keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Static identity of one exposed metric: name, help text, and kind.
///
/// Per-application identity is embedded in the name itself
/// (`unit_<app>_…`); descriptors carry no label dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    name: String,
    help: &'static str,
    kind: MetricKind,
}

impl MetricDescriptor {
    fn new(name: impl Into<String>, help: &'static str, kind: MetricKind) -> Self {
        Self {
            name: name.into(),
            help,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }
}

/// The four per-application metric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMetricField {
    ProcessRunning,
    ProcessStarting,
    ProcessIdle,
    RequestsActive,
}

impl AppMetricField {
    /// All fields, in advertisement and emission order.
    pub const ALL: [AppMetricField; 4] = [
        AppMetricField::ProcessRunning,
        AppMetricField::ProcessStarting,
        AppMetricField::ProcessIdle,
        AppMetricField::RequestsActive,
    ];
}

/// Descriptor group for one application.
#[derive(Debug, Clone)]
struct AppDescriptors {
    process_running: MetricDescriptor,
    process_starting: MetricDescriptor,
    process_idle: MetricDescriptor,
    requests_active: MetricDescriptor,
}

impl AppDescriptors {
    fn new(app: &str) -> Self {
        Self {
            process_running: MetricDescriptor::new(
                format!("unit_{app}_process_running"),
                "Shows current count of running processes",
                MetricKind::Gauge,
            ),
            process_starting: MetricDescriptor::new(
                format!("unit_{app}_process_starting"),
                "Shows current count of starting processes",
                MetricKind::Gauge,
            ),
            process_idle: MetricDescriptor::new(
                format!("unit_{app}_process_idle"),
                "Shows current count of idle processes",
                MetricKind::Gauge,
            ),
            requests_active: MetricDescriptor::new(
                format!("unit_{app}_requests_active"),
                "Shows current count of active requests",
                MetricKind::Gauge,
            ),
        }
    }

    fn get(&self, field: AppMetricField) -> &MetricDescriptor {
        match field {
            AppMetricField::ProcessRunning => &self.process_running,
            AppMetricField::ProcessStarting => &self.process_starting,
            AppMetricField::ProcessIdle => &self.process_idle,
            AppMetricField::RequestsActive => &self.requests_active,
        }
    }
}

/// The full descriptor set: five global descriptors plus one group per
/// application discovered at construction.
///
/// Read-only after construction; safe to share across concurrent scrape
/// cycles without locking.
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    pub(crate) connections_accepted: MetricDescriptor,
    pub(crate) connections_active: MetricDescriptor,
    pub(crate) connections_idle: MetricDescriptor,
    pub(crate) connections_closed: MetricDescriptor,
    pub(crate) requests_total: MetricDescriptor,
    /// Application groups, keyed by name. BTreeMap keeps enumeration
    /// order deterministic across calls.
    applications: BTreeMap<String, AppDescriptors>,
}

impl MetricCatalog {
    /// Build the catalog from the initial snapshot.
    ///
    /// Descriptor names are unique as long as application names are
    /// unique, which the server's own configuration namespace guarantees.
    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Self {
        let applications = snapshot
            .applications
            .keys()
            .map(|name| (name.clone(), AppDescriptors::new(name)))
            .collect();

        Self {
            connections_accepted: MetricDescriptor::new(
                "unit_connections_accepted_total",
                "Shows total count of accepted connections",
                MetricKind::Counter,
            ),
            connections_active: MetricDescriptor::new(
                "unit_connections_active",
                "Shows current count of active connections",
                MetricKind::Gauge,
            ),
            connections_idle: MetricDescriptor::new(
                "unit_connections_idle",
                "Shows current count of idle connections",
                MetricKind::Gauge,
            ),
            connections_closed: MetricDescriptor::new(
                "unit_connections_closed_total",
                "Shows total count of closed connections",
                MetricKind::Counter,
            ),
            requests_total: MetricDescriptor::new(
                "unit_requests_total",
                "Shows total count of requests",
                MetricKind::Counter,
            ),
            applications,
        }
    }

    /// Every descriptor, for one-time schema advertisement.
    ///
    /// Stable order: the five globals, then each application's four
    /// fields. Each per-application descriptor appears exactly once,
    /// matching what collection emits.
    pub fn descriptors(&self) -> Vec<&MetricDescriptor> {
        let mut out = vec![
            &self.connections_accepted,
            &self.connections_active,
            &self.connections_idle,
            &self.connections_closed,
            &self.requests_total,
        ];
        for group in self.applications.values() {
            for field in AppMetricField::ALL {
                out.push(group.get(field));
            }
        }
        out
    }

    /// Application names known to the catalog, in enumeration order.
    pub fn application_names(&self) -> impl Iterator<Item = &str> {
        self.applications.keys().map(String::as_str)
    }

    /// Look up one per-application descriptor.
    ///
    /// `None` when the application was not present at construction time.
    pub fn descriptor_for(&self, app: &str, field: AppMetricField) -> Option<&MetricDescriptor> {
        self.applications.get(app).map(|group| group.get(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(json: &str) -> StatusSnapshot {
        serde_json::from_str(json).unwrap()
    }

    fn two_app_snapshot() -> StatusSnapshot {
        snapshot(
            r#"{
                "connections": {"accepted": 10, "active": 2, "idle": 1, "closed": 7},
                "requests": {"total": 100},
                "applications": {
                    "app1": {"requests": {"active": 3},
                             "processes": {"running": 2, "starting": 0, "idle": 1}},
                    "app2": {"requests": {"active": 0},
                             "processes": {"running": 1, "starting": 1, "idle": 0}}
                }
            }"#,
        )
    }

    #[test]
    fn globals_only_without_applications() {
        let catalog = MetricCatalog::from_snapshot(&snapshot("{}"));
        let descriptors = catalog.descriptors();

        assert_eq!(descriptors.len(), 5);
        assert_eq!(descriptors[0].name(), "unit_connections_accepted_total");
        assert_eq!(descriptors[0].kind(), MetricKind::Counter);
        assert_eq!(descriptors[1].name(), "unit_connections_active");
        assert_eq!(descriptors[1].kind(), MetricKind::Gauge);
        assert_eq!(descriptors[4].name(), "unit_requests_total");
    }

    #[test]
    fn four_descriptors_per_application() {
        let catalog = MetricCatalog::from_snapshot(&two_app_snapshot());
        let descriptors = catalog.descriptors();

        // 5 globals + 4 per application.
        assert_eq!(descriptors.len(), 5 + 4 * 2);

        let names: Vec<&str> = descriptors.iter().map(|d| d.name()).collect();
        assert!(names.contains(&"unit_app1_process_running"));
        assert!(names.contains(&"unit_app1_process_starting"));
        assert!(names.contains(&"unit_app1_process_idle"));
        assert!(names.contains(&"unit_app1_requests_active"));
        assert!(names.contains(&"unit_app2_process_running"));
    }

    #[test]
    fn descriptor_names_are_unique() {
        let catalog = MetricCatalog::from_snapshot(&two_app_snapshot());
        let mut names: Vec<&str> = catalog.descriptors().iter().map(|d| d.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn enumeration_is_replayable() {
        let catalog = MetricCatalog::from_snapshot(&two_app_snapshot());

        let first: Vec<(String, MetricKind)> = catalog
            .descriptors()
            .iter()
            .map(|d| (d.name().to_string(), d.kind()))
            .collect();
        let second: Vec<(String, MetricKind)> = catalog
            .descriptors()
            .iter()
            .map(|d| (d.name().to_string(), d.kind()))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn descriptor_for_known_application() {
        let catalog = MetricCatalog::from_snapshot(&two_app_snapshot());

        let desc = catalog
            .descriptor_for("app1", AppMetricField::RequestsActive)
            .unwrap();
        assert_eq!(desc.name(), "unit_app1_requests_active");
        assert_eq!(desc.kind(), MetricKind::Gauge);
    }

    #[test]
    fn descriptor_for_unknown_application_is_none() {
        let catalog = MetricCatalog::from_snapshot(&two_app_snapshot());
        assert!(
            catalog
                .descriptor_for("app3", AppMetricField::ProcessRunning)
                .is_none()
        );
    }

    #[test]
    fn application_names_are_sorted() {
        let catalog = MetricCatalog::from_snapshot(&two_app_snapshot());
        let names: Vec<&str> = catalog.application_names().collect();
        assert_eq!(names, vec!["app1", "app2"]);
    }
}
