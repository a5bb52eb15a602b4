//! Health and status API with a uniform response envelope.
//!
//! Layout follows a hexagonal split: [`domain`] holds the failure taxonomy
//! and health aggregation, [`inbound`] the HTTP adapter, [`outbound`] the
//! PostgreSQL probe, and [`middleware`] the request observer and the
//! terminal error boundary.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod logging;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
