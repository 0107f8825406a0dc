//! Status code and received response
//!
//! Holds what came back from a single call: status code, body text and
//! elapsed time. Responses are transient; checks read them and only derived
//! fields survive into a `TestResult`.

use std::time::Duration;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// 200 OK
    pub const OK: Self = Self(200);
    /// 400 Bad Request
    pub const BAD_REQUEST: Self = Self(400);

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Response received for an `ApiRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body as (lossy) UTF-8 text.
    pub body: String,
    /// Time from sending the request to reading the full body.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a response from raw parts.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, body: impl Into<String>, duration: Duration) -> Self {
        Self {
            status: status.into(),
            body: body.into(),
            duration,
        }
    }

    /// Creates a response from raw body bytes, replacing invalid UTF-8.
    #[must_use]
    pub fn from_bytes(status: impl Into<StatusCode>, body: &[u8], duration: Duration) -> Self {
        Self::new(status, String::from_utf8_lossy(body).into_owned(), duration)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Elapsed time in whole milliseconds, saturating.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_code_from_u16() {
        assert_eq!(StatusCode::from(400), StatusCode::BAD_REQUEST);
        assert_eq!(StatusCode::OK.as_u16(), 200);
    }

    #[test]
    fn test_response_json() {
        let response = ApiResponse::new(200, r#"{"status": "running"}"#, Duration::ZERO);
        let value = response.json().ok();
        assert_eq!(value, Some(serde_json::json!({"status": "running"})));

        let response = ApiResponse::new(502, "<html>Bad Gateway</html>", Duration::ZERO);
        assert!(response.json().is_err());
    }

    #[test]
    fn test_from_bytes_is_lossy() {
        let response = ApiResponse::from_bytes(200, &[0x6f, 0x6b, 0xff], Duration::ZERO);
        assert_eq!(response.body, "ok\u{fffd}");
    }

    #[test]
    fn test_elapsed_ms() {
        let response = ApiResponse::new(200, "", Duration::from_micros(150_900));
        assert_eq!(response.elapsed_ms(), 150);
    }
}
