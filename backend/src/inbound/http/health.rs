//! Service banner, health and system information endpoints.
//!
//! ```text
//! GET /                 service banner
//! GET /api/health       aggregated health check
//! GET /api/health/info  system information
//! GET /api/info         system information (alias)
//! ```
//!
//! A degraded health check is still a successful request: the status lives
//! in the body, not in the transport status.

use actix_web::{get, web};
use serde::Serialize;

use crate::domain::health::{APP_NAME, APP_VERSION};
use crate::domain::{HealthCheckResult, SystemInfo};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{self, SuccessEnvelope};
use crate::inbound::http::state::HttpState;

/// Payload of the service banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    /// Service version.
    pub version: String,
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    tags = ["Info"],
    responses(
        (status = 200, description = "Service is running", body = crate::inbound::http::schemas::BannerEnvelopeSchema)
    )
)]
#[get("/")]
pub async fn root() -> ApiResult<web::Json<SuccessEnvelope<Banner>>> {
    let message = format!("{APP_NAME} is running");
    let banner = Banner {
        version: APP_VERSION.to_owned(),
    };
    Ok(web::Json(envelope::success(banner, Some(message.as_str()))))
}

/// Aggregated health of the API and its database.
#[utoipa::path(
    get,
    path = "/api/health",
    tags = ["Health"],
    responses(
        (status = 200, description = "Health check result, including degraded states", body = crate::inbound::http::schemas::HealthEnvelopeSchema)
    )
)]
#[get("/api/health")]
pub async fn health_check(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SuccessEnvelope<HealthCheckResult>>> {
    let result = state.health.check().await;
    Ok(web::Json(envelope::success(result, None)))
}

fn info_envelope(state: &HttpState) -> web::Json<SuccessEnvelope<SystemInfo>> {
    web::Json(envelope::success(state.health.system_info(), None))
}

/// System information.
#[utoipa::path(
    get,
    path = "/api/health/info",
    tags = ["Health"],
    responses(
        (status = 200, description = "Static system information", body = crate::inbound::http::schemas::InfoEnvelopeSchema)
    )
)]
#[get("/api/health/info")]
pub async fn health_info(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SuccessEnvelope<SystemInfo>>> {
    Ok(info_envelope(&state))
}

/// System information; alias of `/api/health/info`.
#[utoipa::path(
    get,
    path = "/api/info",
    tags = ["Info"],
    responses(
        (status = 200, description = "Static system information", body = crate::inbound::http::schemas::InfoEnvelopeSchema)
    )
)]
#[get("/api/info")]
pub async fn system_info(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SuccessEnvelope<SystemInfo>>> {
    Ok(info_envelope(&state))
}
