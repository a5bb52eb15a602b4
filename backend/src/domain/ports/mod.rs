//! Domain ports and supporting types for the hexagonal boundary.

mod database_probe;

#[cfg(test)]
pub use database_probe::MockDatabaseProbe;
pub use database_probe::{DatabaseProbe, DatabaseProbeError, UnconfiguredDatabaseProbe};
