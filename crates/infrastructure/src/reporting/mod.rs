//! Run output: console progress and the JSON report file.

mod console;
mod json;

pub use console::ConsoleReporter;
pub use json::{ReportError, write_json_report};
