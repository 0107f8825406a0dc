//! Shared response checks.
//!
//! Every endpoint check is built from the helpers here: status, JSON decoding,
//! typed shape decoding and value predicates. A failing helper returns a
//! [`CheckFailure`] that knows which details to attach to the logged result.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::contract::{ErrorBody, ResponseShape};
use crate::response::{ApiResponse, StatusCode};

/// Structured details attached to a `TestResult`.
pub type Details = Map<String, Value>;

/// Outcome of one logical check: the success details or the first failure.
pub type CheckOutcome = Result<Details, CheckFailure>;

/// Why a check failed.
///
/// `Display` renders the predicate part of the message; callers prefix it
/// with a subject, e.g. "Health check" + "response missing required fields: status".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckFailure {
    /// The request never produced a response.
    #[error("failed with transport error: {message}")]
    Transport {
        /// Error text from the HTTP client.
        message: String,
    },

    /// The status code differs from the expected one.
    #[error("returned status code {actual}, expected {expected}")]
    UnexpectedStatus {
        /// Expected status code.
        expected: u16,
        /// Received status code.
        actual: u16,
        /// Raw response body.
        body: String,
    },

    /// The body could not be parsed as JSON.
    #[error("returned a body that is not valid JSON: {reason}")]
    InvalidJson {
        /// Parser error.
        reason: String,
        /// Raw response body.
        body: String,
    },

    /// The body parsed but is the wrong kind of JSON value.
    #[error("response is not {expected}")]
    WrongType {
        /// Description of the expected kind, e.g. "a JSON array".
        expected: &'static str,
        /// Decoded body.
        actual: Value,
    },

    /// Required fields are absent.
    #[error("response missing required fields: {}", missing.join(", "))]
    MissingFields {
        /// Fields that were not present.
        missing: Vec<&'static str>,
        /// Full required field set.
        expected: &'static [&'static str],
        /// Decoded body (or the offending element).
        actual: Value,
    },

    /// The body is well formed but a value predicate did not hold.
    #[error("{reason}")]
    Rejected {
        /// What was wrong.
        reason: String,
        /// Details to attach, usually including the response.
        details: Details,
    },
}

impl CheckFailure {
    /// Creates a `Transport` failure from any displayable error.
    #[must_use]
    pub fn transport(error: impl std::fmt::Display) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }

    /// Creates a `Rejected` failure.
    #[must_use]
    pub fn rejected(reason: impl Into<String>, details: Details) -> Self {
        Self::Rejected {
            reason: reason.into(),
            details,
        }
    }

    /// Details to attach to the failed result.
    #[must_use]
    pub fn details(&self) -> Details {
        match self {
            Self::Transport { message } => details(serde_json::json!({ "exception": message })),
            Self::UnexpectedStatus {
                expected,
                actual,
                body,
            } => details(serde_json::json!({
                "status_code": actual,
                "expected_status": expected,
                "response": body,
            })),
            Self::InvalidJson { reason, body } => {
                details(serde_json::json!({ "response": body, "reason": reason }))
            }
            Self::WrongType { actual, .. } => details(serde_json::json!({
                "response_type": json_type_name(actual),
                "response": actual,
            })),
            Self::MissingFields {
                missing,
                expected,
                actual,
            } => details(serde_json::json!({
                "missing": missing,
                "expected": expected,
                "response": actual,
            })),
            Self::Rejected { details, .. } => details.clone(),
        }
    }
}

/// Converts a JSON object literal into `Details`; other values yield an empty map.
#[must_use]
pub fn details(value: Value) -> Details {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Checks that the response carries `expected` status.
///
/// # Errors
///
/// Returns `UnexpectedStatus` with the raw body on mismatch.
pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<(), CheckFailure> {
    if response.status == expected {
        Ok(())
    } else {
        Err(CheckFailure::UnexpectedStatus {
            expected: expected.as_u16(),
            actual: response.status.as_u16(),
            body: response.body.clone(),
        })
    }
}

/// Parses the response body as JSON.
///
/// # Errors
///
/// Returns `InvalidJson` if parsing fails.
pub fn decode_json(response: &ApiResponse) -> Result<Value, CheckFailure> {
    response.json().map_err(|e| CheckFailure::InvalidJson {
        reason: e.to_string(),
        body: response.body.clone(),
    })
}

/// Decodes a JSON object into the shape `T` without checking required fields.
///
/// # Errors
///
/// Returns `WrongType` for non-objects.
pub fn decode_object<T: ResponseShape>(value: &Value) -> Result<T, CheckFailure> {
    if !value.is_object() {
        return Err(CheckFailure::WrongType {
            expected: "a JSON object",
            actual: value.clone(),
        });
    }

    serde_json::from_value(value.clone()).map_err(|e| CheckFailure::InvalidJson {
        reason: e.to_string(),
        body: value.to_string(),
    })
}

/// Decodes a JSON object into the shape `T` and checks its required fields.
///
/// # Errors
///
/// Returns `WrongType` for non-objects and `MissingFields` when any required
/// field is absent.
pub fn decode_shape<T: ResponseShape>(value: &Value) -> Result<T, CheckFailure> {
    let shape: T = decode_object(value)?;

    let missing = shape.missing_fields();
    if missing.is_empty() {
        Ok(shape)
    } else {
        Err(CheckFailure::MissingFields {
            missing,
            expected: T::REQUIRED,
            actual: value.clone(),
        })
    }
}

/// Unwraps a JSON array.
///
/// # Errors
///
/// Returns `WrongType` if the value is not an array.
pub fn expect_array(value: Value) -> Result<Vec<Value>, CheckFailure> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(CheckFailure::WrongType {
            expected: "a JSON array",
            actual: other,
        }),
    }
}

/// Checks the error contract for rejected requests: status 400 and an
/// `error` string mentioning "required" (case-insensitive).
///
/// # Errors
///
/// Returns the first failing condition.
pub fn expect_required_error(response: &ApiResponse) -> CheckOutcome {
    expect_status(response, StatusCode::BAD_REQUEST)?;
    let value = decode_json(response)?;
    let body: ErrorBody = decode_shape(&value)?;

    let mentions_required = body
        .error
        .as_ref()
        .and_then(Value::as_str)
        .is_some_and(|text| text.to_lowercase().contains("required"));

    if mentions_required {
        Ok(details(serde_json::json!({ "error_response": value })))
    } else {
        Err(CheckFailure::rejected(
            "error response format incorrect",
            details(serde_json::json!({ "response": value })),
        ))
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Whether an optional field is present and truthy.
#[must_use]
pub fn is_present_and_truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Whether `haystack` mentions `needle`: element equality for arrays,
/// substring for strings, key lookup for objects, false otherwise.
#[must_use]
pub fn mentions(haystack: &Value, needle: &str) -> bool {
    match haystack {
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(needle)),
        Value::String(text) => text.contains(needle),
        Value::Object(map) => map.contains_key(needle),
        _ => false,
    }
}

/// Short name of a JSON value's kind.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
