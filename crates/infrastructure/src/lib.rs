//! gencheck infrastructure: adapters and run output.
//!
//! Concrete implementations of the application ports (reqwest HTTP client,
//! system clock, console reporter), the JSON report writer and validated
//! configuration.

pub mod adapters;
pub mod config;
pub mod reporting;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, HarnessConfig, RawConfig};
pub use reporting::{ConsoleReporter, ReportError, write_json_report};
