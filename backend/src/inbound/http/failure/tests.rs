//! Tests for failure classification precedence and defect masking.

use super::*;
use crate::domain::FieldError;
use crate::test_support::capture_logs;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;
use tracing::Level;

#[fixture]
fn production() -> ErrorClassifier {
    ErrorClassifier::new(RuntimeMode::Production)
}

#[fixture]
fn development() -> ErrorClassifier {
    ErrorClassifier::new(RuntimeMode::Development)
}

fn body(envelope: &ErrorEnvelope) -> Value {
    serde_json::to_value(envelope).expect("envelope serialises")
}

#[rstest]
fn operational_error_keeps_message_and_status(production: ErrorClassifier) {
    let envelope = production.classify(Failure::from(Error::not_found("widget missing")));

    assert_eq!(
        body(&envelope),
        json!({
            "success": false,
            "error": { "message": "widget missing", "statusCode": 404 }
        })
    );
    assert_eq!(envelope.status().as_u16(), 404);
}

#[rstest]
fn internal_operational_error_is_not_masked(production: ErrorClassifier) {
    let envelope = production.classify(Failure::from(Error::internal("quota exhausted")));

    assert_eq!(envelope.error().message(), "quota exhausted");
    assert_eq!(envelope.error().status_code(), 500);
}

#[rstest]
fn validation_error_exposes_field_details(development: ErrorClassifier) {
    let error = Error::validation(
        "Validation failed",
        vec![FieldError::new("must be positive").with_field("page")],
    );

    let envelope = development.classify(Failure::from(error));

    assert_eq!(envelope.error().status_code(), 400);
    assert_eq!(
        envelope.error().details(),
        Some(&json!({ "errors": [{ "field": "page", "message": "must be positive" }] }))
    );
}

#[rstest]
fn schema_validation_forces_bad_request(production: ErrorClassifier) {
    let envelope = production.classify(Failure::SchemaValidation(
        "Query deserialize error: invalid digit found in string".to_owned(),
    ));

    assert_eq!(
        body(&envelope),
        json!({
            "success": false,
            "error": {
                "message": "Validation error",
                "statusCode": 400,
                "details": "Query deserialize error: invalid digit found in string"
            }
        })
    );
}

#[rstest]
fn route_miss_forces_not_found(development: ErrorClassifier) {
    let envelope = development.classify(Failure::RouteNotFound);

    assert_eq!(
        body(&envelope),
        json!({
            "success": false,
            "error": { "message": "Endpoint not found", "statusCode": 404 }
        })
    );
}

fn defect(message: &str) -> Failure {
    Failure::Defect {
        message: message.to_owned(),
        detail: format!("Defect({message:?})"),
        code: None,
    }
}

#[rstest]
fn defect_is_masked_in_production(production: ErrorClassifier) {
    let envelope = production.classify(defect("connection string leaked"));

    assert_eq!(
        body(&envelope),
        json!({
            "success": false,
            "error": { "message": "Internal server error", "statusCode": 500 }
        })
    );
}

#[rstest]
#[case(RuntimeMode::Development)]
#[case(RuntimeMode::Test)]
#[case(RuntimeMode::Staging)]
fn defect_is_verbatim_outside_production(#[case] mode: RuntimeMode) {
    let envelope = ErrorClassifier::new(mode).classify(defect("connection string leaked"));

    assert_eq!(envelope.error().message(), "connection string leaked");
    assert_eq!(envelope.error().status_code(), 500);
}

#[rstest]
fn empty_defect_message_uses_fallback(development: ErrorClassifier) {
    let envelope = development.classify(defect("  "));

    assert_eq!(envelope.error().message(), "An unexpected error occurred");
}

#[rstest]
fn non_operational_error_is_a_defect(production: ErrorClassifier) {
    let failure = Failure::from(Error::defect("pool poisoned"));
    assert!(matches!(failure, Failure::Defect { .. }));

    let envelope = production.classify(failure);
    assert_eq!(envelope.error().message(), "Internal server error");
}

#[rstest]
fn actix_wrapped_domain_error_stays_operational() {
    let err = actix_web::Error::from(Error::conflict("already exists"));

    assert_eq!(
        Failure::from_actix(&err),
        Failure::Operational(Error::conflict("already exists"))
    );
}

#[rstest]
fn actix_route_miss_is_recognised() {
    let err = actix_web::Error::from(RouteNotFound);

    assert_eq!(Failure::from_actix(&err), Failure::RouteNotFound);
}

#[rstest]
#[case(actix_web::Error::from(JsonPayloadError::ContentType))]
#[case(actix_web::Error::from(UrlencodedError::Chunked))]
fn extractor_errors_are_schema_validation(#[case] err: actix_web::Error) {
    let failure = Failure::from_actix(&err);

    assert_eq!(failure, Failure::SchemaValidation(err.to_string()));
}

#[rstest]
fn foreign_actix_error_is_a_defect_with_code() {
    let err = actix_web::error::ErrorBadGateway("upstream down");

    match Failure::from_actix(&err) {
        Failure::Defect { message, code, .. } => {
            assert_eq!(message, "upstream down");
            assert_eq!(code.as_deref(), Some("502"));
        }
        other => panic!("expected defect, got {other:?}"),
    }
}

#[rstest]
#[case(Box::new("static boom") as Box<dyn Any + Send>, "static boom")]
#[case(Box::new(String::from("owned boom")) as Box<dyn Any + Send>, "owned boom")]
#[case(Box::new(7_u8) as Box<dyn Any + Send>, "")]
fn panic_payloads_become_defects(#[case] payload: Box<dyn Any + Send>, #[case] expected: &str) {
    match Failure::from_panic(payload.as_ref()) {
        Failure::Defect { message, code, .. } => {
            assert_eq!(message, expected);
            assert_eq!(code.as_deref(), Some("PANIC"));
        }
        other => panic!("expected defect, got {other:?}"),
    }
}

#[rstest]
#[case(Failure::from(Error::not_found("widget missing")), Level::WARN)]
#[case(Failure::SchemaValidation("missing field `id`".to_owned()), Level::WARN)]
#[case(Failure::RouteNotFound, Level::WARN)]
#[case(defect("connection string leaked"), Level::ERROR)]
#[case(Failure::from(Error::defect("pool poisoned")), Level::ERROR)]
fn classify_logs_one_event_at_the_branch_level(
    production: ErrorClassifier,
    #[case] failure: Failure,
    #[case] level: Level,
) {
    let (logs, _guard) = capture_logs();

    production.classify(failure);

    assert_eq!(logs.total(), 1, "{}", logs.contents());
    assert_eq!(logs.count(level), 1, "{}", logs.contents());
}

#[rstest]
fn masked_defects_still_log_the_real_message(production: ErrorClassifier) {
    let (logs, _guard) = capture_logs();

    let envelope = production.classify(defect("connection string leaked"));

    assert_eq!(envelope.error().message(), "Internal server error");
    assert!(logs.contents().contains("connection string leaked"));
}

#[rstest]
#[actix_web::test]
async fn classified_failure_renders_its_envelope(production: ErrorClassifier) {
    let envelope = production.classify(Failure::RouteNotFound);
    let err = actix_web::Error::from(ClassifiedFailure::from(envelope.clone()));

    let response = err.error_response();
    assert_eq!(response.status().as_u16(), 404);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    assert_eq!(
        serde_json::from_slice::<Value>(&bytes).expect("body is JSON"),
        body(&envelope)
    );
}
