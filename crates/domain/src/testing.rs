//! Test results and run reports.
//!
//! A run produces one [`TestResult`] per logical check and one
//! [`GroupOutcome`] per test group; both end up in the [`RunReport`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::check::Details;

/// Record of one check outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Check name, e.g. "Code Generation - Backend API".
    #[serde(rename = "test")]
    pub name: String,
    /// Whether the check passed.
    pub success: bool,
    /// One-line outcome description.
    pub message: String,
    /// When the outcome was recorded.
    pub timestamp: DateTime<Utc>,
    /// Structured details, may be empty.
    #[serde(default)]
    pub details: Details,
}

impl TestResult {
    /// Create a passed result.
    #[must_use]
    pub fn pass(
        name: impl Into<String>,
        message: impl Into<String>,
        details: Details,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            success: true,
            message: message.into(),
            timestamp,
            details,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        details: Details,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            success: false,
            message: message.into(),
            timestamp,
            details,
        }
    }

    /// "PASS" or "FAIL".
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.success { "PASS" } else { "FAIL" }
    }
}

/// The five top-level endpoint checks, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestGroup {
    /// `GET /`
    HealthCheck,
    /// `POST /generate`
    CodeGeneration,
    /// `POST /preview`
    PreviewGeneration,
    /// `GET /conversations`
    ConversationsHistory,
    /// `GET /templates`
    Templates,
}

impl TestGroup {
    /// All groups in the order they run.
    pub const ALL: [Self; 5] = [
        Self::HealthCheck,
        Self::CodeGeneration,
        Self::PreviewGeneration,
        Self::ConversationsHistory,
        Self::Templates,
    ];

    /// Stable snake_case key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::HealthCheck => "health_check",
            Self::CodeGeneration => "code_generation",
            Self::PreviewGeneration => "preview_generation",
            Self::ConversationsHistory => "conversations_history",
            Self::Templates => "templates",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HealthCheck => "Health Check",
            Self::CodeGeneration => "Code Generation",
            Self::PreviewGeneration => "Preview Generation",
            Self::ConversationsHistory => "Conversations History",
            Self::Templates => "Templates",
        }
    }

    /// Endpoint exercised by the group, for banners.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::HealthCheck => "GET /",
            Self::CodeGeneration => "POST /generate",
            Self::PreviewGeneration => "POST /preview",
            Self::ConversationsHistory => "GET /conversations",
            Self::Templates => "GET /templates",
        }
    }
}

impl fmt::Display for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Aggregate outcome of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOutcome {
    /// The group.
    pub group: TestGroup,
    /// Whether the group passed.
    pub passed: bool,
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier of the run.
    pub run_id: Uuid,
    /// Base URL the run targeted.
    pub base_url: String,
    /// When the first group started.
    pub started_at: DateTime<Utc>,
    /// When the last group finished.
    pub finished_at: DateTime<Utc>,
    /// One outcome per group, in run order.
    pub outcomes: Vec<GroupOutcome>,
    /// Every recorded result, in the order recorded.
    pub results: Vec<TestResult>,
}

impl RunReport {
    /// Create a report with a fresh run id.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        outcomes: Vec<GroupOutcome>,
        results: Vec<TestResult>,
    ) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            base_url: base_url.into(),
            started_at,
            finished_at,
            outcomes,
            results,
        }
    }

    /// Number of groups.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of passed groups.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Number of failed groups.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Check if every group passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Outcome of `group`, if it ran.
    #[must_use]
    pub fn outcome(&self, group: TestGroup) -> Option<bool> {
        self.outcomes
            .iter()
            .find(|o| o.group == group)
            .map(|o| o.passed)
    }

    /// Group key to outcome, in run order.
    #[must_use]
    pub fn outcome_map(&self) -> Vec<(&'static str, bool)> {
        self.outcomes
            .iter()
            .map(|o| (o.group.key(), o.passed))
            .collect()
    }

    /// Results that did not pass.
    pub fn failed_results(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
