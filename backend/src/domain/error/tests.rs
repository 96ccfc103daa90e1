//! Tests for domain error construction and serialisation.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::invalid_identifier("missing"), ErrorCode::InvalidIdentifier)]
#[case(Error::conflicting_identifier("mismatch"), ErrorCode::ConflictingIdentifier)]
#[case(Error::wrong_time("started"), ErrorCode::WrongTime)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::wrong_time("started") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_code_in_snake_case(expected_trace_id: String) {
    let error = Error::conflicting_identifier("mismatch")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "pathId": 3, "payloadId": 4 }));

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(value["code"], "conflicting_identifier");
    assert_eq!(value["message"], "mismatch");
    assert_eq!(value["traceId"], expected_trace_id);
    assert_eq!(value["details"]["payloadId"], 4);
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::invalid_identifier("missing"))
        .expect("error serialises");

    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
fn without_details_keeps_trace_id(expected_trace_id: String) {
    let error = Error::internal("boom")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }))
        .without_details();

    assert!(error.details().is_none());
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn display_renders_message() {
    assert_eq!(Error::wrong_time("lesson 7 has already started").to_string(),
        "lesson 7 has already started");
}
