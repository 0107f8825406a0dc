//! `POST /preview` checks.

use gencheck_domain::check::{
    decode_json, decode_object, details, expect_required_error, expect_status, is_present_and_truthy,
};
use gencheck_domain::{
    ApiRequest, ApiResponse, CheckFailure, PREVIEW_SNIPPET, PreviewBody, PreviewRequest, StatusCode,
};
use serde_json::json;

use crate::ports::{Clock, HttpClient, Reporter};
use crate::runner::{Passed, TestRunner, Verdict};

const PREVIEW_PATH: &str = "/preview";

/// Judges a preview response: 200 and `success`, `previewUrl`, `previewId`
/// all present and truthy.
///
/// # Errors
///
/// Returns the first failing condition.
pub fn evaluate_preview(response: &ApiResponse) -> Verdict {
    expect_status(response, StatusCode::OK)?;
    let value = decode_json(response)?;
    let body: PreviewBody = decode_object(&value)?;

    let complete = is_present_and_truthy(body.success.as_ref())
        && is_present_and_truthy(body.preview_url.as_ref())
        && is_present_and_truthy(body.preview_id.as_ref());
    if !complete {
        return Err(CheckFailure::rejected(
            "response missing content",
            details(json!({ "response": value })),
        ));
    }

    Ok(Passed::new(
        "Preview generation successful with valid response",
        details(json!({
            "preview_url": body.preview_url,
            "preview_id": body.preview_id,
            "success": body.success,
        })),
    ))
}

/// Judges the answer to a preview request without code.
///
/// # Errors
///
/// Returns the first failing condition.
pub fn evaluate_missing_code(response: &ApiResponse) -> Verdict {
    expect_required_error(response)
        .map(|details| Passed::new("Proper error handling for missing code parameter", details))
}

impl<C: HttpClient, K: Clock, R: Reporter> TestRunner<C, K, R> {
    /// Preview group: a valid snippet, then an empty body.
    ///
    /// Both sub-checks are recorded; the group outcome follows the valid
    /// snippet alone.
    pub async fn check_preview(&mut self) -> bool {
        let request = ApiRequest::post_json(PREVIEW_PATH, PreviewRequest::new(PREVIEW_SNIPPET).to_json());
        let verdict = self
            .exchange(&request)
            .await
            .and_then(|response| evaluate_preview(&response));
        let generated = self.record("Code Preview Generation", "Preview generation", verdict);

        self.announce("Error Handling - Missing Code");
        let request = ApiRequest::post_json(PREVIEW_PATH, PreviewRequest::default().to_json());
        let verdict = self
            .exchange(&request)
            .await
            .and_then(|response| evaluate_missing_code(&response));
        self.record(
            "Code Preview - Error Handling",
            "Preview error handling",
            verdict,
        );

        generated
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, body, Duration::from_millis(8))
    }

    #[test]
    fn test_valid_preview() {
        let body = r#"{"success": true, "previewUrl": "/preview/42", "previewId": "42"}"#;
        let passed = evaluate_preview(&response(200, body)).unwrap();
        assert_eq!(passed.details["preview_url"], json!("/preview/42"));
        assert_eq!(passed.details["preview_id"], json!("42"));
    }

    #[test]
    fn test_empty_preview_id() {
        let body = r#"{"success": true, "previewUrl": "/preview/", "previewId": ""}"#;
        let failure = evaluate_preview(&response(200, body)).unwrap_err();
        assert_eq!(failure.to_string(), "response missing content");
    }

    #[test]
    fn test_storage_failure() {
        let body = r#"{"success": false, "error": "Failed to create preview"}"#;
        let failure = evaluate_preview(&response(500, body)).unwrap_err();
        assert_eq!(failure.to_string(), "returned status code 500, expected 200");
    }

    #[test]
    fn test_empty_body_rejected_properly() {
        let verdict = evaluate_missing_code(&response(400, r#"{"error": "Code is required"}"#));
        assert!(verdict.is_ok());
    }

    #[test]
    fn test_empty_body_accepted_is_failure() {
        let body = r#"{"success": true, "previewUrl": "/preview/1", "previewId": "1"}"#;
        let failure = evaluate_missing_code(&response(200, body)).unwrap_err();
        assert!(matches!(
            failure,
            CheckFailure::UnexpectedStatus {
                expected: 400,
                actual: 200,
                ..
            }
        ));
    }
}
