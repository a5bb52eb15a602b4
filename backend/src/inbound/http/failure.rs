//! Terminal failure classification.
//!
//! Every request that ends abnormally is reduced to a [`Failure`] and handed
//! to [`ErrorClassifier::classify`], which logs it once and produces the
//! final [`ErrorEnvelope`]. Precedence, first match wins:
//!
//! 1. an operational domain [`Error`] keeps its own message and status;
//! 2. an extractor (schema validation) failure becomes `400 Validation error`;
//! 3. an unmatched route becomes `404 Endpoint not found`;
//! 4. anything else is a defect: `500`, with the message masked in
//!    production.

use std::any::Any;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::Value;
use tracing::{error, warn};

use crate::config::RuntimeMode;
use crate::domain::Error;
use crate::inbound::http::envelope::{self, ErrorEnvelope};
use crate::inbound::http::error::RouteNotFound;

/// Message returned for defects in production.
pub const MASKED_DEFECT_MESSAGE: &str = "Internal server error";

/// Message returned for defects that carry no message of their own.
pub const FALLBACK_DEFECT_MESSAGE: &str = "An unexpected error occurred";

/// Message returned for request schema validation failures.
pub const VALIDATION_MESSAGE: &str = "Validation error";

/// Message returned when no route matched.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Endpoint not found";

/// Code attached to defects raised by a panicking handler.
const PANIC_CODE: &str = "PANIC";

/// Closed set of abnormal request outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// An anticipated failure raised by a handler.
    Operational(Error),
    /// The request did not match the expected schema.
    SchemaValidation(String),
    /// No route matched the request.
    RouteNotFound,
    /// An unexpected defect.
    Defect {
        /// Defect message; never shown to clients in production.
        message: String,
        /// Debug rendering for the logs.
        detail: String,
        /// Failure code supplied by the transport, if any.
        code: Option<String>,
    },
}

impl Failure {
    /// Classify an error surfaced by Actix.
    pub fn from_actix(err: &actix_web::Error) -> Self {
        if let Some(domain) = err.as_error::<Error>() {
            return Self::from(domain.clone());
        }
        if err.as_error::<RouteNotFound>().is_some() {
            return Self::RouteNotFound;
        }
        if is_schema_validation(err) {
            return Self::SchemaValidation(err.to_string());
        }
        Self::Defect {
            message: err.to_string(),
            detail: format!("{err:?}"),
            code: Some(err.as_response_error().status_code().as_str().to_owned()),
        }
    }

    /// Classify the payload of a panic caught at the request boundary.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|m| (*m).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default();
        Self::Defect {
            detail: format!("handler panicked: {message}"),
            message,
            code: Some(PANIC_CODE.to_owned()),
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        if error.is_operational() {
            Self::Operational(error)
        } else {
            Self::Defect {
                detail: format!("{error:?}"),
                message: error.message().to_owned(),
                code: None,
            }
        }
    }
}

fn is_schema_validation(err: &actix_web::Error) -> bool {
    err.as_error::<JsonPayloadError>().is_some()
        || err.as_error::<QueryPayloadError>().is_some()
        || err.as_error::<PathError>().is_some()
        || err.as_error::<UrlencodedError>().is_some()
}

/// Maps failures onto error envelopes for a given runtime mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClassifier {
    mode: RuntimeMode,
}

impl ErrorClassifier {
    /// Create a classifier that masks defects when `mode` is production.
    pub const fn new(mode: RuntimeMode) -> Self {
        Self { mode }
    }

    /// Log `failure` once and build the envelope sent to the client.
    pub fn classify(&self, failure: Failure) -> ErrorEnvelope {
        match failure {
            Failure::Operational(err) => {
                warn!(
                    status_code = err.status_code(),
                    message = err.message(),
                    is_operational = err.is_operational(),
                    "application error"
                );
                envelope::error(err.message(), err.status_code(), err.details())
            }
            Failure::SchemaValidation(message) => {
                warn!(error = %message, "validation error");
                envelope::error(VALIDATION_MESSAGE, 400, Some(Value::String(message)))
            }
            Failure::RouteNotFound => {
                warn!("endpoint not found");
                envelope::error(ROUTE_NOT_FOUND_MESSAGE, 404, None)
            }
            Failure::Defect {
                message,
                detail,
                code,
            } => {
                error!(error = %message, %detail, code = code.as_deref(), "unexpected error");
                envelope::error(self.client_message(message), 500, None)
            }
        }
    }

    fn client_message(&self, message: String) -> String {
        if self.mode.is_production() {
            MASKED_DEFECT_MESSAGE.to_owned()
        } else if message.trim().is_empty() {
            FALLBACK_DEFECT_MESSAGE.to_owned()
        } else {
            message
        }
    }
}

/// An [`ErrorEnvelope`] that has already been classified and logged.
///
/// Returned as an `Err` by the error boundary when it has no response to
/// rewrite; the server renders it verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .0.error().message())]
pub struct ClassifiedFailure(ErrorEnvelope);

impl ClassifiedFailure {
    /// Envelope sent to the client.
    pub fn envelope(&self) -> &ErrorEnvelope {
        &self.0
    }
}

impl From<ErrorEnvelope> for ClassifiedFailure {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self(envelope)
    }
}

impl ResponseError for ClassifiedFailure {
    fn status_code(&self) -> StatusCode {
        self.0.status()
    }

    fn error_response(&self) -> HttpResponse {
        self.0.clone().into_response()
    }
}

#[cfg(test)]
mod tests;
