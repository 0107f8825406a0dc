//! Gencheck Application - Test runner and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, clock, reporter)
//! - The per-endpoint test procedures
//! - The run orchestrator that ties them together

pub mod ports;
pub mod procedures;
pub mod runner;

pub use ports::{Clock, HttpClient, HttpClientError, Reporter};
pub use runner::{GENERATION_SUB_CHECKS, Passed, RunOptions, TestRunner, Verdict};
