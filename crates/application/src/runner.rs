//! Test runner and run orchestrator.
//!
//! The runner owns the HTTP client, the clock, the reporter and the
//! append-only result log. Groups run one after another in a fixed order and a
//! failing group never stops the ones after it.

use std::time::Duration;

use gencheck_domain::check::CheckFailure;
use gencheck_domain::{
    ApiRequest, ApiResponse, DEFAULT_EXPECTED_MODEL, Details, GroupOutcome, RunReport, TestGroup,
    TestResult,
};
use tracing::{debug, info};

use crate::ports::{Clock, HttpClient, Reporter};

/// Number of sub-checks in the code generation group: four variants plus the
/// missing-message case.
pub const GENERATION_SUB_CHECKS: usize = 5;

/// Knobs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Delay after each generation variant.
    pub pacing: Duration,
    /// Generation sub-checks that must pass for the group to pass.
    pub generation_threshold: usize,
    /// Model the health endpoint must list among its services.
    pub expected_model: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            pacing: Duration::from_secs(1),
            generation_threshold: 4,
            expected_model: DEFAULT_EXPECTED_MODEL.to_string(),
        }
    }
}

/// Successful check: the message and details to log.
#[derive(Debug, Clone, PartialEq)]
pub struct Passed {
    /// Result message.
    pub message: String,
    /// Result details.
    pub details: Details,
}

impl Passed {
    /// Creates a new `Passed`.
    #[must_use]
    pub fn new(message: impl Into<String>, details: Details) -> Self {
        Self {
            message: message.into(),
            details,
        }
    }
}

/// Verdict of a single check.
pub type Verdict = Result<Passed, CheckFailure>;

/// Runs the endpoint test groups against one service.
pub struct TestRunner<C, K, R> {
    base_url: String,
    client: C,
    clock: K,
    reporter: R,
    pub(crate) options: RunOptions,
    results: Vec<TestResult>,
}

impl<C: HttpClient, K: Clock, R: Reporter> TestRunner<C, K, R> {
    /// Creates a runner. `base_url` is only used for reporting; the client
    /// resolves request paths itself.
    pub fn new(
        base_url: impl Into<String>,
        client: C,
        clock: K,
        reporter: R,
        options: RunOptions,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            clock,
            reporter,
            options,
            results: Vec::new(),
        }
    }

    /// Results recorded so far in the current run.
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Consumes the runner and returns its reporter.
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Runs every group in order and returns the report.
    ///
    /// The result log is moved into the report, so the runner starts empty
    /// if it is run again.
    pub async fn run_all(&mut self) -> RunReport {
        info!(base_url = %self.base_url, "starting API test run");
        self.reporter.run_started(&self.base_url);
        let started_at = self.clock.now();

        let mut outcomes = Vec::with_capacity(TestGroup::ALL.len());
        for group in TestGroup::ALL {
            self.reporter.group_started(group);
            let passed = self.run_group(group).await;
            debug!(group = group.key(), passed, "group finished");
            outcomes.push(GroupOutcome { group, passed });
        }

        let report = RunReport::new(
            self.base_url.clone(),
            started_at,
            self.clock.now(),
            outcomes,
            std::mem::take(&mut self.results),
        );
        self.reporter.run_finished(&report);
        info!(
            passed = report.passed(),
            total = report.total(),
            "API test run finished"
        );
        report
    }

    /// Runs a single group and returns whether it passed.
    pub async fn run_group(&mut self, group: TestGroup) -> bool {
        match group {
            TestGroup::HealthCheck => self.check_health().await,
            TestGroup::CodeGeneration => self.check_code_generation().await,
            TestGroup::PreviewGeneration => self.check_preview().await,
            TestGroup::ConversationsHistory => self.check_conversations().await,
            TestGroup::Templates => self.check_templates().await,
        }
    }

    /// Sends a request, turning transport errors into check failures.
    pub(crate) async fn exchange(&self, request: &ApiRequest) -> Result<ApiResponse, CheckFailure> {
        match self.client.send(request).await {
            Ok(response) => {
                debug!(
                    request = %request.label(),
                    status = response.status.as_u16(),
                    elapsed_ms = response.elapsed_ms(),
                    "response received"
                );
                Ok(response)
            }
            Err(e) => {
                debug!(request = %request.label(), error = %e, "request failed");
                Err(CheckFailure::transport(e))
            }
        }
    }

    /// Logs the verdict of a check under `name` and returns whether it passed.
    ///
    /// Failure messages are `"{subject} {failure}"`.
    pub(crate) fn record(&mut self, name: &str, subject: &str, verdict: Verdict) -> bool {
        let now = self.clock.now();
        let result = match verdict {
            Ok(passed) => TestResult::pass(name, passed.message, passed.details, now),
            Err(failure) => TestResult::fail(
                name,
                format!("{subject} {failure}"),
                failure.details(),
                now,
            ),
        };
        self.push(result)
    }

    /// Appends a result and streams it to the reporter.
    pub(crate) fn push(&mut self, result: TestResult) -> bool {
        let success = result.success;
        self.reporter.result_recorded(&result);
        self.results.push(result);
        success
    }

    pub(crate) fn announce(&mut self, sub_check: &str) {
        self.reporter.sub_check_started(sub_check);
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Courtesy delay between generation calls.
    pub(crate) async fn pace(&self) {
        if !self.options.pacing.is_zero() {
            tokio::time::sleep(self.options.pacing).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RunOptions::default();
        assert_eq!(options.pacing, Duration::from_secs(1));
        assert_eq!(options.generation_threshold, 4);
        assert_eq!(options.expected_model, "OpenAI GPT-4");
    }
}
