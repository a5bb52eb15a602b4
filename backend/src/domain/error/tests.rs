//! Tests for the failure taxonomy and its constructors.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::bad_request("bad"), ErrorKind::BadRequest, 400)]
#[case(Error::unauthorized("who"), ErrorKind::Unauthorized, 401)]
#[case(Error::forbidden("denied"), ErrorKind::Forbidden, 403)]
#[case(Error::not_found("missing"), ErrorKind::NotFound, 404)]
#[case(Error::conflict("taken"), ErrorKind::Conflict, 409)]
#[case(Error::validation("invalid", Vec::new()), ErrorKind::Validation, 400)]
#[case(Error::internal("boom"), ErrorKind::InternalServer, 500)]
fn constructors_set_kind_and_status(
    #[case] error: Error,
    #[case] kind: ErrorKind,
    #[case] status: u16,
) {
    assert_eq!(error.kind(), kind);
    assert_eq!(error.status_code(), status);
    assert!(error.is_operational());
}

#[rstest]
fn status_codes_stay_in_error_range() {
    let kinds = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::Validation,
        ErrorKind::InternalServer,
    ];
    for kind in kinds {
        assert!((400..=599).contains(&kind.status_code()), "{kind:?}");
    }
}

#[rstest]
fn defect_is_not_operational() {
    let error = Error::defect("pool poisoned");

    assert_eq!(error.kind(), ErrorKind::InternalServer);
    assert_eq!(error.message(), "pool poisoned");
    assert!(!error.is_operational());
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_messages_fall_back_to_kind_default(#[case] message: &str) {
    let error = Error::conflict(message);

    assert_eq!(error.message(), "Resource already exists");
}

#[rstest]
fn display_renders_the_message() {
    assert_eq!(Error::not_found("widget missing").to_string(), "widget missing");
}

#[rstest]
fn details_are_absent_without_field_errors() {
    assert!(Error::bad_request("bad").details().is_none());
    assert!(Error::validation("invalid", Vec::new()).details().is_none());
}

#[rstest]
fn validation_details_list_field_errors() {
    let error = Error::validation(
        "Validation failed",
        vec![
            FieldError::new("must be positive")
                .with_field("limit")
                .with_code("too_small"),
            FieldError::new("unexpected payload"),
        ],
    );

    assert_eq!(error.field_errors().len(), 2);
    assert_eq!(
        error.details(),
        Some(json!({
            "errors": [
                { "field": "limit", "message": "must be positive", "code": "too_small" },
                { "message": "unexpected payload" }
            ]
        }))
    );
}
