//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their structure and are registered with utoipa under
//! the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or violates lesson invariants.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// An identifier does not resolve or a required one is absent.
    #[schema(rename = "invalid_identifier")]
    InvalidIdentifier,
    /// Path and payload identifiers differ.
    #[schema(rename = "conflicting_identifier")]
    ConflictingIdentifier,
    /// The lesson has already started.
    #[schema(rename = "wrong_time")]
    WrongTime,
    /// The lesson store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "wrong_time")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "lesson 7 has already started")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
