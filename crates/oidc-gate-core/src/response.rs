// crates/oidc-gate-core/src/response.rs
// ============================================================================
// Module: Denied HTTP Response Model
// Description: Denial response owned by the authorization server.
// Purpose: Give the trigger a structural, comparable view of the deny reply.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The authorization server hands the trigger a denial response to enrich. The
//! model mirrors the external-authorization wire shape: an optional status, an
//! ordered list of header options, and a body. Equality is structural so
//! callers can snapshot a response and prove it was left untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// HTTP "See Other" status code.
pub const SEE_OTHER: u16 = 303;
/// Header key carrying the redirect target.
pub const LOCATION_HEADER: &str = "Location";

// ============================================================================
// SECTION: Types
// ============================================================================

/// HTTP status attached to a denial response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpStatus {
    /// Numeric status code.
    pub code: u16,
}

impl HttpStatus {
    /// Redirect status used to send the client to a login endpoint.
    #[must_use]
    pub const fn see_other() -> Self {
        Self {
            code: SEE_OTHER,
        }
    }
}

/// Single header key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderValue {
    /// Header name.
    pub key: String,
    /// Header value.
    pub value: String,
}

/// Header entry plus its merge behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderValueOption {
    /// The header to emit.
    pub header: HeaderValue,
    /// Whether the proxy appends to an existing header of the same key
    /// (`Some(true)`) or sets it (`Some(false)`). `None` leaves the proxy default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,
}

impl HeaderValueOption {
    /// Builds a header option with `append` left unset.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header: HeaderValue {
                key: key.into(),
                value: value.into(),
            },
            append: None,
        }
    }

    /// Builds a `Location` header that does not request appending.
    #[must_use]
    pub fn location(url: impl Into<String>) -> Self {
        Self {
            append: Some(false),
            ..Self::new(LOCATION_HEADER, url)
        }
    }
}

/// Denial response returned to the downstream client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeniedHttpResponse {
    /// Status code, if the server set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HttpStatus>,
    /// Headers in emission order.
    #[serde(default)]
    pub headers: Vec<HeaderValueOption>,
    /// Response body.
    #[serde(default)]
    pub body: String,
}

impl DeniedHttpResponse {
    /// Returns the first header value for `key` (ASCII case-insensitive).
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|option| option.header.key.eq_ignore_ascii_case(key))
            .map(|option| option.header.value.as_str())
    }

    /// Returns the status code, if set.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status.map(|status| status.code)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn location_header_requests_no_append() {
        let option = HeaderValueOption::location("http://log/in/A");
        assert_eq!(option.header.key, LOCATION_HEADER);
        assert_eq!(option.header.value, "http://log/in/A");
        assert_eq!(option.append, Some(false));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = DeniedHttpResponse {
            headers: vec![HeaderValueOption::new("x-header", "x")],
            ..DeniedHttpResponse::default()
        };
        assert_eq!(response.header("X-Header"), Some("x"));
        assert_eq!(response.header("location"), None);
    }

    #[test]
    fn deserializes_sparse_response() {
        let response: DeniedHttpResponse =
            serde_json::from_value(json!({"headers": [{"header": {"key": "a", "value": "b"}}]}))
                .unwrap();
        assert_eq!(response.status, None);
        assert_eq!(response.headers, vec![HeaderValueOption::new("a", "b")]);
        assert!(response.body.is_empty());
    }

    #[test]
    fn serializes_status_and_append_flag() {
        let response = DeniedHttpResponse {
            status: Some(HttpStatus::see_other()),
            headers: vec![HeaderValueOption::location("http://log/in/A")],
            body: String::new(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"]["code"], json!(303));
        assert_eq!(value["headers"][0]["append"], json!(false));
        assert_eq!(response.status_code(), Some(SEE_OTHER));
    }
}
