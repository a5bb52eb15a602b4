//! Driven port for checking database reachability.
//!
//! The health service only needs to know whether a lightweight round-trip to
//! the database succeeds. Adapters decide how that round-trip is made; the
//! probe must have no side effects.

use async_trait::async_trait;

/// Reasons a database probe can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseProbeError {
    /// No database connection string was configured.
    #[error("database is not configured")]
    NotConfigured,
    /// A connection could not be obtained.
    #[error("database connection failed: {message}")]
    Connection { message: String },
    /// The probe query was rejected or failed mid-flight.
    #[error("database probe query failed: {message}")]
    Query { message: String },
}

impl DatabaseProbeError {
    /// Build a [`DatabaseProbeError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`DatabaseProbeError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for a side-effect free database round-trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Return `Ok(())` when the database answered the probe.
    async fn ping(&self) -> Result<(), DatabaseProbeError>;
}

/// Probe used when no database URL is configured; always reports failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredDatabaseProbe;

#[async_trait]
impl DatabaseProbe for UnconfiguredDatabaseProbe {
    async fn ping(&self) -> Result<(), DatabaseProbeError> {
        Err(DatabaseProbeError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn unconfigured_probe_reports_not_configured() {
        let result = UnconfiguredDatabaseProbe.ping().await;

        assert_eq!(result, Err(DatabaseProbeError::NotConfigured));
    }

    #[rstest]
    fn error_messages_carry_context() {
        let connection = DatabaseProbeError::connection("refused");
        let query = DatabaseProbeError::query("syntax");

        assert_eq!(connection.to_string(), "database connection failed: refused");
        assert_eq!(query.to_string(), "database probe query failed: syntax");
    }
}
