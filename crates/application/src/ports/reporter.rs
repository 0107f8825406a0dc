//! Reporter port
//!
//! Receives run progress as it happens. Results are streamed one by one, not
//! batched at the end.

use gencheck_domain::{RunReport, TestGroup, TestResult};

/// Observer of a test run.
pub trait Reporter {
    /// A run against `base_url` is starting.
    fn run_started(&mut self, _base_url: &str) {}

    /// `group` is about to run.
    fn group_started(&mut self, _group: TestGroup) {}

    /// A named sub-check inside the current group is about to run.
    fn sub_check_started(&mut self, _name: &str) {}

    /// A result was appended to the log.
    fn result_recorded(&mut self, result: &TestResult);

    /// The run is complete.
    fn run_finished(&mut self, _report: &RunReport) {}
}
