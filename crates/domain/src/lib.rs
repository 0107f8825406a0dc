//! Gencheck Domain - Core types
//!
//! This crate defines the domain model of the API test harness: requests and
//! responses, typed response shapes, the shared checks and the result types.
//! All types here are pure Rust with no I/O dependencies.

pub mod check;
pub mod contract;
pub mod fixtures;
pub mod request;
pub mod response;
pub mod testing;

pub use check::{CheckFailure, CheckOutcome, Details};
pub use contract::{
    ConversationRecord, ErrorBody, GenerateBody, HealthBody, PreviewBody, ResponseShape,
    TemplateRecord,
};
pub use fixtures::{
    DEFAULT_EXPECTED_MODEL, EXPECTED_TEMPLATE_IDS, GenerateRequest, PREVIEW_SNIPPET,
    PreviewRequest, ProjectType, TestCase, generation_cases,
};
pub use request::{ApiRequest, HttpMethod};
pub use response::{ApiResponse, StatusCode};
pub use testing::{GroupOutcome, RunReport, TestGroup, TestResult};
