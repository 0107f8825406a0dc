//! `POST /generate` code generation checks.
//!
//! Four prompt variants plus one request without a prompt. The group uses a
//! tolerance: it passes when `generation_threshold` of the five sub-checks
//! pass. A summary result names the failed sub-checks so the tolerance never
//! hides which one broke.

use gencheck_domain::check::{
    decode_json, decode_object, details, expect_required_error, expect_status, is_present_and_truthy,
};
use gencheck_domain::{
    ApiRequest, ApiResponse, CheckFailure, GenerateBody, GenerateRequest, ProjectType, StatusCode,
    TestCase, TestResult, generation_cases,
};
use serde_json::{Value, json};

use crate::ports::{Clock, HttpClient, Reporter};
use crate::runner::{GENERATION_SUB_CHECKS, Passed, TestRunner, Verdict};

const GENERATE_PATH: &str = "/generate";

/// Judges the answer to a generation variant: 200 and `success`,
/// `explanation` and `code` all present and truthy.
///
/// # Errors
///
/// Returns the first failing condition; absent or empty content is reported
/// as "response missing content".
pub fn evaluate_generation(case: &TestCase, response: &ApiResponse) -> Verdict {
    expect_status(response, StatusCode::OK)?;
    let value = decode_json(response)?;
    let body: GenerateBody = decode_object(&value)?;

    let empty: Vec<&str> = [
        ("success", body.success.as_ref()),
        ("explanation", body.explanation.as_ref()),
        ("code", body.code.as_ref()),
    ]
    .into_iter()
    .filter(|(_, field)| !is_present_and_truthy(*field))
    .map(|(name, _)| name)
    .collect();

    if !empty.is_empty() {
        return Err(CheckFailure::rejected(
            "response missing content",
            details(json!({ "response": value, "empty_fields": empty })),
        ));
    }

    let model = body
        .model
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    Ok(Passed::new(
        "Code generation successful with valid response",
        details(json!({
            "project_type": case.payload.project_type.as_str(),
            "has_explanation": true,
            "has_code": true,
            "model": model,
        })),
    ))
}

/// Judges the answer to a request without `message`: 400 with an error
/// mentioning "required".
///
/// # Errors
///
/// Returns the first failing condition.
pub fn evaluate_missing_message(response: &ApiResponse) -> Verdict {
    expect_required_error(response)
        .map(|details| Passed::new("Proper error handling for missing message parameter", details))
}

impl<C: HttpClient, K: Clock, R: Reporter> TestRunner<C, K, R> {
    /// Code generation group.
    pub async fn check_code_generation(&mut self) -> bool {
        let mut failed_checks = Vec::new();

        for case in generation_cases() {
            let name = format!("Code Generation - {}", case.name);
            self.announce(case.name);

            let request = ApiRequest::post_json(GENERATE_PATH, case.payload.to_json());
            let verdict = self
                .exchange(&request)
                .await
                .and_then(|response| evaluate_generation(&case, &response));
            if !self.record(&name, "Code generation", verdict) {
                failed_checks.push(name);
            }

            self.pace().await;
        }

        let name = "Code Generation - Error Handling";
        self.announce("Error Handling - Missing Message");
        let request = ApiRequest::post_json(
            GENERATE_PATH,
            GenerateRequest::without_message(ProjectType::Component).to_json(),
        );
        let verdict = self
            .exchange(&request)
            .await
            .and_then(|response| evaluate_missing_message(&response));
        if !self.record(name, "Code generation error handling", verdict) {
            failed_checks.push(name.to_string());
        }

        let threshold = self.options.generation_threshold;
        let passed = GENERATION_SUB_CHECKS - failed_checks.len();
        let group_passed = passed >= threshold;

        let message = format!(
            "{passed}/{GENERATION_SUB_CHECKS} sub-checks passed (threshold {threshold})"
        );
        let summary_details = details(json!({
            "passed": passed,
            "total": GENERATION_SUB_CHECKS,
            "threshold": threshold,
            "failed_checks": failed_checks,
        }));
        let summary = if group_passed {
            TestResult::pass("Code Generation - Summary", message, summary_details, self.now())
        } else {
            TestResult::fail("Code Generation - Summary", message, summary_details, self.now())
        };
        self.push(summary);

        group_passed
    }
}
