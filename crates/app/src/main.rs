//! gencheck - entry point
//!
//! Parses options, runs every endpoint check once and exits with 0 when all
//! groups pass, 1 when any group fails and 2 on configuration or report
//! errors.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use gencheck_application::TestRunner;
use gencheck_infrastructure::{
    ConsoleReporter, HarnessConfig, ReqwestHttpClient, SystemClock, write_json_report,
};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

const EXIT_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match HarnessConfig::from_raw(cli.into_raw()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let client = match ReqwestHttpClient::new(config.base_url.clone(), config.timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: failed to create HTTP client: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let mut runner = TestRunner::new(
        config.base_url.as_str(),
        client,
        SystemClock::new(),
        ConsoleReporter::stdout(),
        config.run,
    );
    let report = runner.run_all().await;

    if let Some(path) = &config.report
        && let Err(e) = write_json_report(path, &report)
    {
        eprintln!("error: {e}");
        return ExitCode::from(EXIT_USAGE);
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILED)
    }
}
