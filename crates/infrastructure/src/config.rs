//! Validated harness configuration.
//!
//! The binary parses raw values from flags and environment; this module
//! turns them into typed settings or a `ConfigError`.

use std::path::PathBuf;
use std::time::Duration;

use gencheck_application::{GENERATION_SUB_CHECKS, RunOptions};
use thiserror::Error;
use url::Url;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default delay after each generation variant, in milliseconds.
pub const DEFAULT_PACING_MS: u64 = 1000;
/// Default number of generation sub-checks that must pass.
pub const DEFAULT_THRESHOLD: usize = 4;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No base URL was given.
    #[error("base URL is required (--base-url or GENCHECK_BASE_URL)")]
    MissingBaseUrl,

    /// The base URL does not parse.
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The timeout is zero.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    /// The threshold is outside `1..=5`.
    #[error("threshold must be between 1 and {max}, got {value}")]
    ThresholdOutOfRange {
        /// The rejected value.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// The expected model name is blank.
    #[error("expected model must not be empty")]
    EmptyExpectedModel,
}

/// Unvalidated settings as collected from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    /// Service base URL.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Pacing delay in milliseconds.
    pub pacing_ms: u64,
    /// Generation threshold.
    pub threshold: usize,
    /// Model the health check must list.
    pub expected_model: String,
    /// Optional JSON report path.
    pub report: Option<PathBuf>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            pacing_ms: DEFAULT_PACING_MS,
            threshold: DEFAULT_THRESHOLD,
            expected_model: gencheck_domain::DEFAULT_EXPECTED_MODEL.to_string(),
            report: None,
        }
    }
}

/// Validated configuration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Service base URL.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Options handed to the runner.
    pub run: RunOptions,
    /// Where to write the JSON report, if anywhere.
    pub report: Option<PathBuf>,
}

impl HarnessConfig {
    /// Validates raw settings.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let text = raw
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = parse_base_url(text)?;

        if raw.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !(1..=GENERATION_SUB_CHECKS).contains(&raw.threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: raw.threshold,
                max: GENERATION_SUB_CHECKS,
            });
        }
        let expected_model = raw.expected_model.trim();
        if expected_model.is_empty() {
            return Err(ConfigError::EmptyExpectedModel);
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(raw.timeout_secs),
            run: RunOptions {
                pacing: Duration::from_millis(raw.pacing_ms),
                generation_threshold: raw.threshold,
                expected_model: expected_model.to_string(),
            },
            report: raw.report,
        })
    }
}

fn parse_base_url(text: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: text.to_string(),
        reason,
    };
    let url = Url::parse(text).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(base_url: &str) -> RawConfig {
        RawConfig {
            base_url: Some(base_url.to_string()),
            ..RawConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::from_raw(raw("https://example.test/api")).unwrap();
        assert_eq!(config.base_url.as_str(), "https://example.test/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.run, RunOptions::default());
        assert_eq!(config.report, None);
    }

    #[test]
    fn test_missing_base_url() {
        assert_eq!(
            HarnessConfig::from_raw(RawConfig::default()),
            Err(ConfigError::MissingBaseUrl)
        );
        assert_eq!(
            HarnessConfig::from_raw(raw("   ")),
            Err(ConfigError::MissingBaseUrl)
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HarnessConfig::from_raw(raw("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let err = HarnessConfig::from_raw(raw("ftp://example.test")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid base URL `ftp://example.test`: unsupported scheme `ftp`"
        );
    }

    #[test]
    fn test_threshold_range() {
        for threshold in [0, 6] {
            let err = HarnessConfig::from_raw(RawConfig {
                threshold,
                ..raw("http://localhost:8001/api")
            })
            .unwrap_err();
            assert_eq!(
                err,
                ConfigError::ThresholdOutOfRange {
                    value: threshold,
                    max: 5
                }
            );
        }

        let config = HarnessConfig::from_raw(RawConfig {
            threshold: 5,
            ..raw("http://localhost:8001/api")
        })
        .unwrap();
        assert_eq!(config.run.generation_threshold, 5);
    }

    #[test]
    fn test_zero_timeout() {
        let err = HarnessConfig::from_raw(RawConfig {
            timeout_secs: 0,
            ..raw("http://localhost/api")
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroTimeout);
    }

    #[test]
    fn test_custom_values() {
        let config = HarnessConfig::from_raw(RawConfig {
            timeout_secs: 3,
            pacing_ms: 0,
            expected_model: "  Claude  ".to_string(),
            report: Some(PathBuf::from("out.json")),
            ..raw("http://localhost/api")
        })
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.run.pacing, Duration::ZERO);
        assert_eq!(config.run.expected_model, "Claude");
        assert_eq!(config.report, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_blank_model() {
        let err = HarnessConfig::from_raw(RawConfig {
            expected_model: " ".to_string(),
            ..raw("http://localhost/api")
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::EmptyExpectedModel);
    }
}
