//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_json(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::invalid_identifier("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflicting_identifier("mismatch"), StatusCode::CONFLICT)]
#[case(Error::wrong_time("started"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("lesson store error: relation \"lessons\" does not exist")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "sql": "SELECT 1" }));

    let (status, header, body) = body_json(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], expected_trace_id);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::conflicting_identifier("path id 3 does not match payload id")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "pathId": 3, "payloadId": 4 }));

    let (status, _, body) = body_json(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflicting_identifier");
    assert_eq!(body["message"], "path id 3 does not match payload id");
    assert_eq!(body["details"]["payloadId"], 4);
}

#[rstest]
#[actix_web::test]
async fn trace_header_is_omitted_without_trace_id() {
    let (_, header, body) = body_json(&Error::wrong_time("started")).await;

    assert!(header.is_none());
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn actix_errors_become_internal_errors() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream detail");
    let error = Error::from(actix_error);

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}
