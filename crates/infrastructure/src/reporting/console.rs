//! Plain-text progress reporter.

use std::io::{self, Write};

use gencheck_application::ports::Reporter;
use gencheck_domain::{RunReport, TestGroup, TestResult};
use tracing::warn;

const RULE_WIDTH: usize = 80;

/// Streams run progress as text to any writer.
///
/// Write failures never interrupt the run; they are logged and the line is
/// dropped.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if let Err(e) = write(&mut self.out).and_then(|()| self.out.flush()) {
            warn!(error = %e, "failed to write report output");
        }
    }

    fn rule(out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self, base_url: &str) {
        self.emit(|out| {
            writeln!(out, "Starting API tests")?;
            writeln!(out, "Base URL: {base_url}")?;
            Self::rule(out)
        });
    }

    fn group_started(&mut self, group: TestGroup) {
        self.emit(|out| writeln!(out, "Testing {} ({})", group.title(), group.endpoint()));
    }

    fn sub_check_started(&mut self, name: &str) {
        self.emit(|out| writeln!(out, "  Testing: {name}"));
    }

    fn result_recorded(&mut self, result: &TestResult) {
        self.emit(|out| {
            writeln!(
                out,
                "{}: {} - {}",
                result.status_label(),
                result.name,
                result.message
            )?;
            if !result.details.is_empty() {
                let details = serde_json::to_string(&result.details)
                    .unwrap_or_else(|e| format!("<unprintable details: {e}>"));
                writeln!(out, "   Details: {details}")?;
            }
            writeln!(out)
        });
    }

    fn run_finished(&mut self, report: &RunReport) {
        self.emit(|out| {
            Self::rule(out)?;
            writeln!(out, "TEST SUMMARY")?;
            Self::rule(out)?;
            for outcome in &report.outcomes {
                let status = if outcome.passed { "PASS" } else { "FAIL" };
                writeln!(out, "{status}: {}", outcome.group.title())?;
            }
            writeln!(out)?;
            writeln!(
                out,
                "Overall Result: {}/{} tests passed",
                report.passed(),
                report.total()
            )?;
            if report.all_passed() {
                writeln!(out, "All API tests passed.")
            } else {
                writeln!(
                    out,
                    "{} test(s) failed. Check details above.",
                    report.failed()
                )
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use gencheck_domain::{GroupOutcome, check::details};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_767_225_600, 0).unwrap()
    }

    fn render(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_result_lines() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.result_recorded(&TestResult::pass(
            "Health Check Endpoint",
            "Health check passed",
            details(json!({"status": "running"})),
            at(),
        ));
        reporter.result_recorded(&TestResult::fail(
            "Templates Endpoint",
            "Templates endpoint response is an empty list",
            serde_json::Map::new(),
            at(),
        ));

        assert_eq!(
            render(reporter),
            "PASS: Health Check Endpoint - Health check passed\n   Details: {\"status\":\"running\"}\n\n\
             FAIL: Templates Endpoint - Templates endpoint response is an empty list\n\n"
        );
    }

    #[test]
    fn test_banners() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.group_started(TestGroup::CodeGeneration);
        reporter.sub_check_started("Backend API");

        assert_eq!(
            render(reporter),
            "Testing Code Generation (POST /generate)\n  Testing: Backend API\n"
        );
    }

    #[test]
    fn test_summary() {
        let outcomes = TestGroup::ALL
            .into_iter()
            .map(|group| GroupOutcome {
                group,
                passed: group != TestGroup::Templates,
            })
            .collect();
        let report = RunReport::new("http://localhost/api", at(), at(), outcomes, Vec::new());

        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.run_finished(&report);
        let text = render(reporter);

        assert!(text.contains("PASS: Health Check\n"));
        assert!(text.contains("FAIL: Templates\n"));
        assert!(text.contains("Overall Result: 4/5 tests passed\n"));
        assert!(text.ends_with("1 test(s) failed. Check details above.\n"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_are_swallowed() {
        let mut reporter = ConsoleReporter::new(BrokenPipe);
        reporter.run_started("http://localhost/api");
        reporter.sub_check_started("Backend API");
    }
}
