//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data`, so they depend
//! only on domain services and stay testable without I/O.

use crate::domain::HealthService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Health aggregation over the configured probes.
    pub health: HealthService,
}

impl HttpState {
    /// Bundle the services the handlers need.
    pub fn new(health: HealthService) -> Self {
        Self { health }
    }
}
