//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::config::{RuntimeConfig, RuntimeMode};
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) mode: RuntimeMode,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Server bound to `bind_addr`, running in `mode`, without a database.
    #[must_use]
    pub fn new(mode: RuntimeMode, bind_addr: SocketAddr) -> Self {
        Self {
            mode,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach the connection pool used by the database probe.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Runtime mode shared by the middleware.
    #[must_use]
    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Whether a database pool is attached.
    #[must_use]
    pub fn has_database(&self) -> bool {
        self.db_pool.is_some()
    }
}

impl From<&RuntimeConfig> for ServerConfig {
    fn from(runtime: &RuntimeConfig) -> Self {
        Self::new(runtime.mode, runtime.bind_addr)
    }
}
