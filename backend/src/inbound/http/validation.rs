//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies carry raw strings and integers; these helpers turn them into
//! domain values and describe failures with a `field`/`value`/`code` details
//! object.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{Error, IdentifierError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidTimestamp,
    InvalidIdentifier,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidIdentifier => "invalid_identifier",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            let field = field.as_str();
            Error::invalid_request(format!("{field} must be an RFC 3339 timestamp")).with_details(
                json!({
                    "field": field,
                    "value": value,
                    "code": ValidationCode::InvalidTimestamp.as_str(),
                }),
            )
        })
}

/// Parse a raw identifier. Non-positive values cannot resolve to any entity,
/// so they are reported as unknown identifiers rather than malformed input.
pub(crate) fn parse_identifier<T>(value: i64, field: FieldName) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdentifierError>,
{
    T::try_from(value).map_err(|err| {
        Error::invalid_identifier(err.to_string()).with_details(json!({
            "field": field.as_str(),
            "value": value,
            "code": ValidationCode::InvalidIdentifier.as_str(),
        }))
    })
}
