//! Outgoing API request

use serde_json::Value;

use super::HttpMethod;

/// A single call against the service, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path below the base URL, e.g. `/generate`.
    pub path: String,
    /// JSON body, sent only for methods that carry one.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Creates a GET request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Creates a POST request for `path` with a JSON body.
    #[must_use]
    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Short `METHOD /path` label used in logs.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}
