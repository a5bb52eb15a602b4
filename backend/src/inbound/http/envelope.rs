//! Uniform response envelopes.
//!
//! Every JSON body the API returns is exactly one of two shapes:
//!
//! ```text
//! { "success": true,  "data"?: T, "message"?: string, "meta"?: PaginationMeta }
//! { "success": false, "error": { "message": string, "statusCode": int, "details"?: any } }
//! ```
//!
//! Optional members are omitted rather than serialised as `null`. The
//! builders below are the only way to construct an envelope, so the
//! `success` discriminant always tells the truth.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use pagination::{PageRequest, PaginationMeta, calculate_pagination};

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<PaginationMeta>,
}

impl<T> SuccessEnvelope<T> {
    /// Always `true`.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Wrapped payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Optional human-readable message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Pagination metadata for list payloads.
    pub fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }
}

impl<T: Serialize> SuccessEnvelope<T> {
    /// Render the envelope as a `200 OK` JSON response.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// Inner object of an error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    message: String,
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ErrorBody {
    /// Client-facing message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Status code mirrored from the transport.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Supplementary details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    success: bool,
    error: ErrorBody,
}

impl ErrorEnvelope {
    /// Always `false`.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Error description.
    pub fn error(&self) -> &ErrorBody {
        &self.error
    }

    /// Transport status matching `error.statusCode`.
    pub fn status(&self) -> StatusCode {
        error_status(self.error.status_code)
    }

    /// Render the envelope as a JSON response whose status matches the body.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status()).json(self)
    }
}

fn error_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code)
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn non_empty(message: Option<&str>) -> Option<String> {
    message.filter(|m| !m.is_empty()).map(str::to_owned)
}

/// Wrap `data` in a success envelope.
///
/// # Examples
/// ```
/// use status_backend::inbound::http::envelope;
///
/// let body = serde_json::to_value(envelope::success(42, None)).unwrap();
/// assert_eq!(body, serde_json::json!({ "success": true, "data": 42 }));
/// ```
pub fn success<T>(data: T, message: Option<&str>) -> SuccessEnvelope<T> {
    SuccessEnvelope {
        success: true,
        data: Some(data),
        message: non_empty(message),
        meta: None,
    }
}

/// Wrap a page of `data` together with its pagination metadata.
pub fn success_with_pagination<T>(
    data: T,
    meta: PaginationMeta,
    message: Option<&str>,
) -> SuccessEnvelope<T> {
    SuccessEnvelope {
        success: true,
        data: Some(data),
        message: non_empty(message),
        meta: Some(meta),
    }
}

/// Success envelope carrying only a message; the `data` key is absent.
pub fn success_message(message: impl Into<String>) -> SuccessEnvelope<()> {
    SuccessEnvelope {
        success: true,
        data: None,
        message: Some(message.into()),
        meta: None,
    }
}

/// Build an error envelope.
///
/// `details` is omitted from the body when `None` or JSON `null`. A
/// `status_code` outside the client and server error ranges is replaced by
/// `500`, so the body always agrees with the transport status.
///
/// # Examples
/// ```
/// use status_backend::inbound::http::envelope;
///
/// let body = serde_json::to_value(envelope::error("widget missing", 404, None)).unwrap();
/// assert_eq!(
///     body,
///     serde_json::json!({
///         "success": false,
///         "error": { "message": "widget missing", "statusCode": 404 }
///     })
/// );
/// ```
pub fn error(message: impl Into<String>, status_code: u16, details: Option<Value>) -> ErrorEnvelope {
    ErrorEnvelope {
        success: false,
        error: ErrorBody {
            message: message.into(),
            status_code: error_status(status_code).as_u16(),
            details: details.filter(|d| !d.is_null()),
        },
    }
}
