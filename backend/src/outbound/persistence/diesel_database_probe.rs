//! PostgreSQL-backed database probe.

use async_trait::async_trait;
use diesel::sql_query;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{DatabaseProbe, DatabaseProbeError};

use super::pool::{DbPool, PoolError};

const PROBE_SQL: &str = "SELECT 1";

/// Runs `SELECT 1` on a pooled connection.
#[derive(Clone)]
pub struct DieselDatabaseProbe {
    pool: DbPool,
}

impl DieselDatabaseProbe {
    /// Create a probe sharing `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DatabaseProbeError {
    match error {
        PoolError::Checkout { message } => DatabaseProbeError::connection(message),
    }
}

#[async_trait]
impl DatabaseProbe for DieselDatabaseProbe {
    async fn ping(&self) -> Result<(), DatabaseProbeError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sql_query(PROBE_SQL)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                let message = error.to_string();
                debug!(%message, "database probe query failed");
                DatabaseProbeError::query(message)
            })
    }
}
