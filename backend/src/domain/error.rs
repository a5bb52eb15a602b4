//! Domain-level failure taxonomy.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorKind`] onto a status code and renders the canonical error envelope;
//! nothing in the domain knows about Actix.
//!
//! Every constructor is infallible. An empty message is replaced by the
//! kind's default message so clients never receive a blank error.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Closed set of failure categories raised by request handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request is malformed.
    BadRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with the current state of a resource.
    Conflict,
    /// One or more fields failed validation.
    Validation,
    /// The server failed while handling an otherwise valid request.
    InternalServer,
}

impl ErrorKind {
    /// HTTP status code associated with this kind.
    ///
    /// Always within the 400–599 error range.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest | Self::Validation => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalServer => 500,
        }
    }

    /// Message used when a caller supplies an empty one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Unauthorized access",
            Self::Forbidden => "Access forbidden",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::Validation => "Validation failed",
            Self::InternalServer => "Internal server error",
        }
    }
}

/// A single field-level validation problem.
///
/// # Examples
/// ```
/// use status_backend::domain::FieldError;
///
/// let entry = FieldError::new("must not be empty")
///     .with_field("name")
///     .with_code("required");
/// assert_eq!(entry.field(), Some("name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl FieldError {
    /// Create an entry that is not tied to a specific field.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
            code: None,
        }
    }

    /// Name the offending field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach a machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Offending field, when known.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Human-readable description of the problem.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Machine-readable code, when supplied.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// A classified failure raised while handling a request.
///
/// Errors built through the public constructors are *operational*: they
/// describe an anticipated client or business failure and their message is
/// safe to show to clients. [`Error::defect`] is the only way to build a
/// non-operational error; the HTTP boundary treats those like any other
/// unexpected defect.
///
/// # Examples
/// ```
/// use status_backend::domain::{Error, ErrorKind};
///
/// let err = Error::not_found("widget missing");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.status_code(), 404);
/// assert!(err.is_operational());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    operational: bool,
    field_errors: Vec<FieldError>,
}

impl Error {
    /// Create an operational error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.default_message().to_owned()
        } else {
            message
        };
        Self {
            kind,
            message,
            operational: true,
            field_errors: Vec::new(),
        }
    }

    /// Convenience constructor for [`ErrorKind::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Convenience constructor for [`ErrorKind::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorKind::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::Validation`] carrying
    /// field-level entries.
    pub fn validation(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        let mut error = Self::new(ErrorKind::Validation, message);
        error.field_errors = field_errors;
        error
    }

    /// Convenience constructor for [`ErrorKind::InternalServer`].
    ///
    /// The message is still shown to clients; use [`Error::defect`] for
    /// failures whose message must stay internal.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalServer, message)
    }

    /// Record an unexpected defect as a non-operational internal error.
    pub fn defect(message: impl Into<String>) -> Self {
        let mut error = Self::new(ErrorKind::InternalServer, message);
        error.operational = false;
        error
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status code derived from the kind.
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Whether the failure was anticipated.
    pub fn is_operational(&self) -> bool {
        self.operational
    }

    /// Field-level validation entries; empty for other kinds.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Structured details for the error envelope.
    ///
    /// Only validation errors with at least one field entry carry details,
    /// rendered as `{ "errors": [...] }`.
    pub fn details(&self) -> Option<Value> {
        if self.field_errors.is_empty() {
            None
        } else {
            Some(json!({ "errors": self.field_errors }))
        }
    }
}

#[cfg(test)]
mod tests;
