//! PostgreSQL adapters using Diesel with `diesel-async` and `bb8` pooling.
//!
//! Adapters are thin translators between pooled connections and domain
//! ports; they hold no business logic.
//!
//! # Example
//!
//! ```ignore
//! use status_backend::outbound::persistence::{DbPool, DieselDatabaseProbe, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/app"));
//! let probe = DieselDatabaseProbe::new(pool);
//! ```

mod diesel_database_probe;
mod pool;

pub use diesel_database_probe::DieselDatabaseProbe;
pub use pool::{DbPool, PoolConfig, PoolError};
