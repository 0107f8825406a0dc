//! Command-line options.

use std::path::PathBuf;

use clap::Parser;
use gencheck_domain::DEFAULT_EXPECTED_MODEL;
use gencheck_infrastructure::RawConfig;
use gencheck_infrastructure::config::{DEFAULT_PACING_MS, DEFAULT_THRESHOLD, DEFAULT_TIMEOUT_SECS};

/// Runs the endpoint checks against a code generation service and prints a
/// pass/fail report.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Service base URL, e.g. https://host/api
    #[arg(long, env = "GENCHECK_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "GENCHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Delay after each code generation request, in milliseconds
    #[arg(long, env = "GENCHECK_PACING_MS", default_value_t = DEFAULT_PACING_MS)]
    pub pacing_ms: u64,

    /// Code generation sub-checks that must pass (1-5)
    #[arg(long, env = "GENCHECK_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: usize,

    /// Model the health check must list among its services
    #[arg(long, env = "GENCHECK_EXPECTED_MODEL", default_value = DEFAULT_EXPECTED_MODEL)]
    pub expected_model: String,

    /// Write the run report as JSON to this path
    #[arg(long, env = "GENCHECK_REPORT", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Raw settings for validation.
    pub fn into_raw(self) -> RawConfig {
        RawConfig {
            base_url: self.base_url,
            timeout_secs: self.timeout_secs,
            pacing_ms: self.pacing_ms,
            threshold: self.threshold,
            expected_model: self.expected_model,
            report: self.report,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "gencheck",
            "--base-url",
            "http://localhost:8001/api",
            "--threshold",
            "5",
            "--pacing-ms",
            "0",
            "--report",
            "run.json",
        ])
        .unwrap();

        let raw = cli.into_raw();
        assert_eq!(raw.base_url.as_deref(), Some("http://localhost:8001/api"));
        assert_eq!(raw.threshold, 5);
        assert_eq!(raw.pacing_ms, 0);
        assert_eq!(raw.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(raw.expected_model, "OpenAI GPT-4");
        assert_eq!(raw.report, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        let err = Cli::try_parse_from(["gencheck", "--timeout-secs", "soon"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
