//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("rating must be an integer"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("no such member"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("index down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON deserialises")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_the_trace(expected_trace_id: String) {
    let error = Error::internal("redis pipeline decoded 3 replies")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }));

    let payload = response_payload(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_pass_through(expected_trace_id: String) {
    let error = Error::invalid_request("bad rating")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "rating" }));

    let payload = response_payload(
        error,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.message(), "bad rating");
    assert_eq!(payload.details(), Some(&json!({ "field": "rating" })));
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_id_omit_the_header() {
    let payload = response_payload(
        Error::service_unavailable("leaderboard index unavailable"),
        StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn redaction_leaves_other_codes_untouched() {
    let error = Error::not_found("missing").with_trace_id(TRACE_ID);
    assert_eq!(redact_if_internal(&error), error);
}

#[rstest]
fn actix_server_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorInternalServerError("pool exhausted").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[rstest]
#[case(actix_web::error::ErrorBadRequest("duplicate field `username`"), "duplicate field `username`")]
#[case(actix_web::error::ErrorBadRequest(""), "Malformed request")]
fn actix_client_errors_become_invalid_requests(
    #[case] source: actix_web::Error,
    #[case] message: &str,
) {
    let err = Error::from(source);

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), message);
}

#[rstest]
#[actix_web::test]
async fn unrouted_requests_get_a_json_not_found() {
    use actix_web::{App, test as actix_test, web};

    let app = actix_test::init_service(
        App::new()
            .route(
                "/leaderboard",
                web::get().to(|| async { HttpResponse::Ok().finish() }),
            )
            .default_service(web::to(route_not_found)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/leaderboard")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "no route for POST /leaderboard");
}
