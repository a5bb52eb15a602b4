//! Runtime configuration loaded via OrthoConfig.
//!
//! [`AppSettings`] is the raw, layered input (CLI flags, `APP_*` environment
//! variables, configuration files). It is converted once at start-up into the
//! immutable [`RuntimeConfig`], which is then passed to the components that
//! depend on it. Nothing reads the environment after that point.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_POOL_SIZE: u32 = 10;

/// Deployment mode; governs defect masking and debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeMode {
    /// Local development: verbose logs, defect messages shown verbatim.
    Development,
    /// Automated test runs.
    Test,
    /// Pre-production environments.
    Staging,
    /// Production: defect messages are masked.
    Production,
}

impl RuntimeMode {
    /// Whether defect messages must be hidden from clients.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Whether debug-level request logging is enabled.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: value.to_owned(),
            }),
        }
    }
}

/// Configuration failures detected at start-up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The layered sources could not be read.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    /// `APP_ENVIRONMENT` was not provided.
    #[error("APP_ENVIRONMENT is required")]
    MissingEnvironment,
    /// `APP_ENVIRONMENT` held an unknown value.
    #[error("unknown runtime environment `{value}`")]
    InvalidEnvironment { value: String },
    /// `APP_HOST` is not an IP address.
    #[error("invalid bind host `{value}`")]
    InvalidHost { value: String },
    /// `APP_DATABASE_POOL_SIZE` was zero.
    #[error("database pool size must be positive")]
    InvalidPoolSize,
}

/// Raw settings as read from CLI, environment and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct AppSettings {
    /// Runtime mode (`development`, `test`, `staging` or `production`).
    pub environment: Option<String>,
    /// IP address to bind to.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub database_pool_size: Option<u32>,
}

impl AppSettings {
    /// Load settings from the process arguments and environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a source cannot be parsed.
    pub fn load_from_process() -> Result<Self, ConfigError> {
        Self::load_from_iter(std::env::args_os()).map_err(|err| ConfigError::Load {
            message: err.to_string(),
        })
    }
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string.
    pub url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

/// Immutable configuration shared by the server components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Deployment mode.
    pub mode: RuntimeMode,
    /// Socket address to bind.
    pub bind_addr: SocketAddr,
    /// Database settings; `None` when no connection string was given.
    pub database: Option<DatabaseSettings>,
}

impl RuntimeConfig {
    /// Configuration for in-process tests: no database, ephemeral port.
    #[must_use]
    pub fn for_mode(mode: RuntimeMode) -> Self {
        Self {
            mode,
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
            database: None,
        }
    }
}

impl TryFrom<AppSettings> for RuntimeConfig {
    type Error = ConfigError;

    fn try_from(settings: AppSettings) -> Result<Self, Self::Error> {
        let mode = settings
            .environment
            .as_deref()
            .ok_or(ConfigError::MissingEnvironment)?
            .parse::<RuntimeMode>()?;

        let host = match settings.host.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_HOST,
            Some(value) => value.parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost {
                value: value.to_owned(),
            })?,
        };
        let bind_addr = SocketAddr::new(host, settings.port.unwrap_or(DEFAULT_PORT));

        let pool_size = settings.database_pool_size.unwrap_or(DEFAULT_POOL_SIZE);
        if pool_size == 0 {
            return Err(ConfigError::InvalidPoolSize);
        }
        let database = settings
            .database_url
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseSettings { url, pool_size });

        Ok(Self {
            mode,
            bind_addr,
            database,
        })
    }
}
