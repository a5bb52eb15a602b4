//! Domain primitives and services.
//!
//! Purpose: define the failure taxonomy and the health aggregation logic
//! without depending on HTTP or persistence frameworks.
//!
//! Public surface:
//! - Error (alias to `error::Error`): classified request failure.
//! - ErrorKind (alias to `error::ErrorKind`): closed failure category.
//! - FieldError (alias to `error::FieldError`): field-level validation entry.
//! - HealthService (alias to `health::HealthService`): health aggregator.

pub mod error;
pub mod health;
pub mod ports;

pub use self::error::{Error, ErrorKind, FieldError};
pub use self::health::{
    HealthCheckResult, HealthService, HealthStatus, ServiceStatus, ServiceStatuses, SystemInfo,
};
