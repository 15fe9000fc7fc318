//! Status snapshot data model.
//!
//! Mirrors the JSON shape of the control API's `GET /status` response. All
//! numeric fields are non-negative and carried as `f64` so counters and
//! gauges map directly onto exposition values. Absent fields decode to
//! zero / empty, matching the server's behavior of omitting idle sections.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One point-in-time read of the server's internal counters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub connections: ConnectionsStatus,
    #[serde(default)]
    pub requests: RequestsStatus,
    /// Per-application state, keyed by the application name from the
    /// server's own configuration namespace.
    #[serde(default)]
    pub applications: BTreeMap<String, ApplicationStatus>,
}

/// Listener connection counters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ConnectionsStatus {
    /// Total accepted connections (counter).
    #[serde(default)]
    pub accepted: f64,
    /// Currently active connections (gauge).
    #[serde(default)]
    pub active: f64,
    /// Currently idle connections (gauge).
    #[serde(default)]
    pub idle: f64,
    /// Total closed connections (counter).
    #[serde(default)]
    pub closed: f64,
}

/// Server-wide request counters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RequestsStatus {
    /// Total requests handled (counter).
    #[serde(default)]
    pub total: f64,
}

/// State of one configured application.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApplicationStatus {
    #[serde(default)]
    pub requests: ApplicationRequests,
    #[serde(default)]
    pub processes: ApplicationProcesses,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApplicationRequests {
    /// Requests currently in flight for this application (gauge).
    #[serde(default)]
    pub active: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApplicationProcesses {
    #[serde(default)]
    pub running: f64,
    #[serde(default)]
    pub starting: f64,
    #[serde(default)]
    pub idle: f64,
}
