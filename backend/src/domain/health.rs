//! Health aggregation and static system metadata.
//!
//! [`HealthService::check`] combines the liveness of the running process with
//! a database round-trip into a tri-state [`HealthStatus`]. Results are
//! recomputed on every call; nothing is cached between probes.
//!
//! A failing database probe never escapes as an error or a panic. It is
//! logged and folded into [`HealthStatus::Degraded`], so the health endpoint
//! keeps answering while the database is down.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ports::DatabaseProbe;

/// Human-readable service name reported by the info endpoint.
pub const APP_NAME: &str = "Status Backend";

/// Service version, taken from the crate manifest.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line description reported by the info endpoint.
pub const APP_DESCRIPTION: &str =
    "Actix-based API with a uniform response envelope and centralised error handling";

/// Features advertised by the info endpoint.
pub const APP_FEATURES: [&str; 5] = [
    "OpenAPI Documentation",
    "PostgreSQL Database",
    "Type-safe validation",
    "Error handling",
    "Request logging",
];

/// Overall health of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every probe succeeded.
    Healthy,
    /// The process answers but a dependency failed.
    Degraded,
    /// The process-level probe failed.
    ///
    /// Kept for forward compatibility; an in-process probe cannot observe it.
    Unhealthy,
}

impl HealthStatus {
    /// Combine process liveness with the database probe outcome.
    #[must_use]
    pub const fn from_probes(api: ServiceStatus, database: ServiceStatus) -> Self {
        match (api, database) {
            (ServiceStatus::Healthy, ServiceStatus::Healthy) => Self::Healthy,
            (ServiceStatus::Healthy, ServiceStatus::Unhealthy) => Self::Degraded,
            (ServiceStatus::Unhealthy, _) => Self::Unhealthy,
        }
    }

    /// Summary sentence reported alongside the status.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Healthy => "All services are operational",
            Self::Degraded => "API is running but database connection failed",
            Self::Unhealthy => "System is unhealthy",
        }
    }
}

/// Health of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// The dependency answered its probe.
    Healthy,
    /// The dependency failed its probe.
    Unhealthy,
}

impl From<bool> for ServiceStatus {
    fn from(ok: bool) -> Self {
        if ok { Self::Healthy } else { Self::Unhealthy }
    }
}

/// Per-dependency breakdown of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatuses {
    /// The HTTP process itself.
    pub api: ServiceStatus,
    /// The PostgreSQL database.
    pub database: ServiceStatus,
}

/// Outcome of a health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Aggregated status.
    pub status: HealthStatus,
    /// Summary sentence matching `status`.
    pub message: String,
    /// When the probes ran.
    pub timestamp: DateTime<Utc>,
    /// Service version.
    pub version: String,
    /// Per-dependency statuses.
    pub services: ServiceStatuses,
}

/// Static description of the running service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
    /// One-line description.
    pub description: String,
    /// Advertised features.
    pub features: Vec<String>,
    /// Named entry points and their paths.
    pub endpoints: BTreeMap<String, String>,
}

/// Aggregates process and dependency probes into a [`HealthCheckResult`].
#[derive(Clone)]
pub struct HealthService {
    database: Arc<dyn DatabaseProbe>,
    clock: Arc<dyn Clock>,
}

impl HealthService {
    /// Create a health service probing `database` and stamping results with
    /// `clock`.
    pub fn new(database: Arc<dyn DatabaseProbe>, clock: Arc<dyn Clock>) -> Self {
        Self { database, clock }
    }

    /// Probe every dependency and aggregate the outcome.
    pub async fn check(&self) -> HealthCheckResult {
        // Answering this call is the liveness probe.
        let api = ServiceStatus::Healthy;
        let database = ServiceStatus::from(self.probe_database().await);
        let status = HealthStatus::from_probes(api, database);

        HealthCheckResult {
            status,
            message: status.message().to_owned(),
            timestamp: self.clock.utc(),
            version: APP_VERSION.to_owned(),
            services: ServiceStatuses { api, database },
        }
    }

    /// Describe the service. Performs no probing.
    pub fn system_info(&self) -> SystemInfo {
        let endpoints = [
            ("health", "/api/health"),
            ("info", "/api/info"),
            ("docs", "/docs"),
            ("swagger", "/docs/json"),
        ]
        .into_iter()
        .map(|(name, path)| (name.to_owned(), path.to_owned()))
        .collect();

        SystemInfo {
            name: APP_NAME.to_owned(),
            version: APP_VERSION.to_owned(),
            description: APP_DESCRIPTION.to_owned(),
            features: APP_FEATURES.iter().map(|&f| f.to_owned()).collect(),
            endpoints,
        }
    }

    async fn probe_database(&self) -> bool {
        let probe = AssertUnwindSafe(async { self.database.ping().await }).catch_unwind();
        match probe.await {
            Ok(Ok(())) => true,
            Ok(Err(error)) => {
                warn!(%error, "database probe failed");
                false
            }
            Err(_) => {
                warn!("database probe panicked");
                false
            }
        }
    }
}
