//! Shared validation helpers for inbound HTTP adapters.
//!
//! Two shapes of failure come out of here. Query-string problems end the
//! request with a `400` [`Error`]; form problems become [`FieldErrors`] that
//! are flashed back to the originating form.

use serde_json::json;

use crate::domain::{Error, FieldErrors};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidInteger,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

fn query_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse an optional positive integer query parameter.
///
/// Absent or empty values yield `None`.
pub(crate) fn parse_optional_u32(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<u32>, Error> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<u32>().map(Some).map_err(|_| {
        query_error(
            field,
            ErrorCode::InvalidInteger,
            format!("{} must be a positive integer", field.as_str()),
            raw,
        )
    })
}

/// Wrap a pagination range failure as a `400` naming the offending field.
pub(crate) fn out_of_range_error(field: FieldName, value: u32, message: String) -> Error {
    query_error(field, ErrorCode::OutOfRange, message, &value.to_string())
}

/// Message recorded when a required form field is missing or blank.
pub(crate) fn required_message(field: FieldName) -> String {
    format!("The {} field is required.", field.as_str())
}

/// Return the trimmed value of a required form field, recording a
/// `required` message in `errors` when it is absent or blank.
pub(crate) fn require_field(
    value: Option<&str>,
    field: FieldName,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Some(raw.to_owned()),
        None => {
            errors.add(field.as_str(), required_message(field));
            None
        }
    }
}

/// Trim an optional form field; blank input counts as absent.
pub(crate) fn optional_field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(str::to_owned)
}
