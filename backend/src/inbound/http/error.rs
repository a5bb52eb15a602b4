//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to return domain failures with `?`. The responses built here are
//! already valid error envelopes; the error boundary middleware replaces them
//! with the classifier's rendering so logging and masking happen in one
//! place.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::Error;
use crate::inbound::http::envelope;
use crate::inbound::http::failure::{MASKED_DEFECT_MESSAGE, ROUTE_NOT_FOUND_MESSAGE};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(error: &Error) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.is_operational() {
            envelope::error(self.message(), self.status_code(), self.details())
        } else {
            envelope::error(MASKED_DEFECT_MESSAGE, self.status_code(), None)
        };
        body.into_response()
    }
}

/// Raised by the application's default service when no route matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no route matched the request")]
pub struct RouteNotFound;

impl ResponseError for RouteNotFound {
    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    fn error_response(&self) -> HttpResponse {
        envelope::error(ROUTE_NOT_FOUND_MESSAGE, StatusCode::NOT_FOUND.as_u16(), None)
            .into_response()
    }
}

/// Default service answering every request no route matched.
pub async fn route_not_found() -> Result<HttpResponse, RouteNotFound> {
    Err(RouteNotFound)
}
