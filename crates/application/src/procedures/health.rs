//! `GET /` health check.

use gencheck_domain::check::{decode_json, decode_shape, details, expect_status, mentions};
use gencheck_domain::{ApiRequest, ApiResponse, CheckFailure, HealthBody, StatusCode};
use serde_json::{Value, json};

use crate::ports::{Clock, HttpClient, Reporter};
use crate::runner::{Passed, TestRunner, Verdict};

const NAME: &str = "Health Check Endpoint";

/// Judges a health response: 200, all fields present, `status == "running"`
/// and `services` mentioning `expected_model`.
///
/// # Errors
///
/// Returns the first failing condition.
pub fn evaluate_health(response: &ApiResponse, expected_model: &str) -> Verdict {
    expect_status(response, StatusCode::OK)?;
    let value = decode_json(response)?;
    let body: HealthBody = decode_shape(&value)?;

    let running = body.status.as_ref().and_then(Value::as_str) == Some("running");
    let lists_model = body
        .services
        .as_ref()
        .is_some_and(|services| mentions(services, expected_model));

    if running && lists_model {
        Ok(Passed::new(
            "Health check endpoint working correctly",
            details(json!({
                "response": value,
                "status_code": response.status.as_u16(),
            })),
        ))
    } else {
        Err(CheckFailure::rejected(
            "response missing expected status or services",
            details(json!({
                "response": value,
                "expected_status": "running",
                "expected_model": expected_model,
            })),
        ))
    }
}

impl<C: HttpClient, K: Clock, R: Reporter> TestRunner<C, K, R> {
    /// Health group: one check against `GET /`.
    pub async fn check_health(&mut self) -> bool {
        let verdict = self
            .exchange(&ApiRequest::get("/"))
            .await
            .and_then(|response| evaluate_health(&response, &self.options.expected_model));
        self.record(NAME, "Health check", verdict)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const MODEL: &str = "OpenAI GPT-4";

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, body, Duration::from_millis(3))
    }

    #[test]
    fn test_healthy_service() {
        let body = r#"{"message": "AI Code Generator API", "status": "running",
                       "services": ["OpenAI GPT-4", "MongoDB", "Code Generation"]}"#;
        let passed = evaluate_health(&response(200, body), MODEL).unwrap();
        assert_eq!(passed.message, "Health check endpoint working correctly");
        assert_eq!(passed.details["status_code"], json!(200));
    }

    #[test]
    fn test_missing_status_field() {
        let body = r#"{"message": "AI Code Generator API", "services": ["OpenAI GPT-4"]}"#;
        let failure = evaluate_health(&response(200, body), MODEL).unwrap_err();
        assert_eq!(failure.to_string(), "response missing required fields: status");
    }

    #[test]
    fn test_not_running() {
        let body = r#"{"message": "m", "status": "degraded", "services": ["OpenAI GPT-4"]}"#;
        let failure = evaluate_health(&response(200, body), MODEL).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "response missing expected status or services"
        );
    }

    #[test]
    fn test_model_not_listed() {
        let body = r#"{"message": "m", "status": "running", "services": ["MongoDB"]}"#;
        assert!(evaluate_health(&response(200, body), MODEL).is_err());
        assert!(evaluate_health(&response(200, body), "MongoDB").is_ok());
    }

    #[test]
    fn test_services_as_object_keys() {
        let body = r#"{"message": "m", "status": "running",
                       "services": {"OpenAI GPT-4": "up", "MongoDB": "up"}}"#;
        assert!(evaluate_health(&response(200, body), MODEL).is_ok());
    }

    #[test]
    fn test_server_error() {
        let failure = evaluate_health(&response(500, "oops"), MODEL).unwrap_err();
        assert!(matches!(
            failure,
            CheckFailure::UnexpectedStatus { actual: 500, .. }
        ));
    }
}
