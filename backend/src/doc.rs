//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the envelope schemas from [`crate::inbound::http::schemas`]. The
//! document is served at `/docs/json`, rendered by Swagger UI at `/docs/`
//! and exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    BannerEnvelopeSchema, BannerSchema, ErrorBodySchema, ErrorEnvelopeSchema,
    HealthCheckResultSchema, HealthEnvelopeSchema, HealthStatusSchema, InfoEnvelopeSchema,
    PaginationMetaSchema, ServiceStatusSchema, ServiceStatusesSchema, SystemInfoSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Status Backend API",
        description = "Health and system information endpoints with a uniform response envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::health_check,
        crate::inbound::http::health::health_info,
        crate::inbound::http::health::system_info,
    ),
    components(schemas(
        BannerEnvelopeSchema,
        BannerSchema,
        HealthEnvelopeSchema,
        InfoEnvelopeSchema,
        HealthCheckResultSchema,
        HealthStatusSchema,
        ServiceStatusSchema,
        ServiceStatusesSchema,
        SystemInfoSchema,
        PaginationMetaSchema,
        ErrorEnvelopeSchema,
        ErrorBodySchema,
    )),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Info", description = "Information endpoints")
    )
)]
pub struct ApiDoc;
