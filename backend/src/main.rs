//! Backend entry-point: loads configuration, installs logging and serves
//! the API.

use tracing::warn;

use status_backend::config::{AppSettings, RuntimeConfig};
use status_backend::logging::init_tracing;
use status_backend::outbound::persistence::{DbPool, PoolConfig};
use status_backend::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = AppSettings::load_from_process().map_err(std::io::Error::other)?;
    let runtime = RuntimeConfig::try_from(settings).map_err(std::io::Error::other)?;
    init_tracing(runtime.mode);

    let mut config = ServerConfig::from(&runtime);
    match &runtime.database {
        Some(database) => {
            let pool =
                DbPool::new(PoolConfig::new(database.url.as_str()).with_max_size(database.pool_size));
            config = config.with_db_pool(pool);
        }
        None => warn!("APP_DATABASE_URL is not set; the database will report unhealthy"),
    }

    create_server(config)?.await
}
