//! OpenAPI schema definitions for envelopes and domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their structure and live in the inbound adapter
//! layer where framework concerns belong.

use std::collections::BTreeMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::HealthStatus`].
#[derive(ToSchema)]
#[schema(as = HealthStatus)]
pub enum HealthStatusSchema {
    /// Every probe succeeded.
    #[schema(rename = "healthy")]
    Healthy,
    /// The API answers but the database probe failed.
    #[schema(rename = "degraded")]
    Degraded,
    /// The API itself is failing.
    #[schema(rename = "unhealthy")]
    Unhealthy,
}

/// OpenAPI schema for [`crate::domain::ServiceStatus`].
#[derive(ToSchema)]
#[schema(as = ServiceStatus)]
pub enum ServiceStatusSchema {
    /// The dependency answered its probe.
    #[schema(rename = "healthy")]
    Healthy,
    /// The dependency failed its probe.
    #[schema(rename = "unhealthy")]
    Unhealthy,
}

/// OpenAPI schema for [`crate::domain::ServiceStatuses`].
#[derive(ToSchema)]
#[schema(as = ServiceStatuses)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ServiceStatusesSchema {
    api: ServiceStatusSchema,
    database: ServiceStatusSchema,
}

/// OpenAPI schema for [`crate::domain::HealthCheckResult`].
#[derive(ToSchema)]
#[schema(as = HealthCheckResult)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HealthCheckResultSchema {
    status: HealthStatusSchema,
    #[schema(example = "All services are operational")]
    message: String,
    /// RFC 3339 time at which the probes ran.
    #[schema(format = DateTime, example = "2024-01-01T00:00:00Z")]
    timestamp: String,
    #[schema(example = "1.0.0")]
    version: String,
    services: ServiceStatusesSchema,
}

/// OpenAPI schema for [`crate::domain::SystemInfo`].
#[derive(ToSchema)]
#[schema(as = SystemInfo)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SystemInfoSchema {
    #[schema(example = "Status Backend")]
    name: String,
    version: String,
    description: String,
    features: Vec<String>,
    /// Entry point name to path, e.g. `health` to `/api/health`.
    endpoints: BTreeMap<String, String>,
}

/// OpenAPI schema for [`crate::inbound::http::health::Banner`].
#[derive(ToSchema)]
#[schema(as = Banner)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BannerSchema {
    #[schema(example = "1.0.0")]
    version: String,
}

/// Success envelope returned by `GET /`.
#[derive(ToSchema)]
#[schema(as = BannerEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BannerEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    #[schema(example = "Status Backend is running")]
    message: String,
    data: BannerSchema,
}

/// Success envelope returned by `GET /api/health`.
#[derive(ToSchema)]
#[schema(as = HealthEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HealthEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    data: HealthCheckResultSchema,
}

/// Success envelope returned by the system information endpoints.
#[derive(ToSchema)]
#[schema(as = InfoEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InfoEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    data: SystemInfoSchema,
}

/// OpenAPI schema for [`pagination::PaginationMeta`].
#[derive(ToSchema)]
#[schema(as = PaginationMeta, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaginationMetaSchema {
    #[schema(example = 2)]
    page: u32,
    #[schema(example = 10)]
    limit: u32,
    #[schema(example = 95)]
    total: u64,
    #[schema(example = 10)]
    total_pages: u64,
    has_next_page: bool,
    has_previous_page: bool,
}

/// OpenAPI schema for [`crate::inbound::http::envelope::ErrorBody`].
#[derive(ToSchema)]
#[schema(as = ErrorBody, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorBodySchema {
    /// Client-facing message.
    #[schema(example = "Endpoint not found")]
    message: String,
    /// Mirrors the transport status.
    #[schema(example = 404)]
    status_code: u16,
    /// Field errors or the raw validation message.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::inbound::http::envelope::ErrorEnvelope`].
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    #[schema(example = false)]
    success: bool,
    error: ErrorBodySchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn health_status_schema_lists_lowercase_variants() {
        let schema_json = schema_to_json::<HealthStatusSchema>();

        assert_eq!(HealthStatusSchema::name(), "HealthStatus");
        for variant in ["healthy", "degraded", "unhealthy"] {
            assert!(schema_json.contains(variant), "missing {variant}");
        }
    }

    #[test]
    fn error_body_schema_uses_camel_case() {
        let schema_json = schema_to_json::<ErrorBodySchema>();

        assert_eq!(ErrorBodySchema::name(), "ErrorBody");
        assert!(schema_json.contains("statusCode"));
        assert!(!schema_json.contains("status_code"));
    }

    #[test]
    fn pagination_meta_schema_uses_camel_case() {
        let schema_json = schema_to_json::<PaginationMetaSchema>();

        assert!(schema_json.contains("totalPages"));
        assert!(schema_json.contains("hasPreviousPage"));
    }
}
