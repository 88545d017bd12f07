//! Graph API send failures

use serde::Deserialize;
use thiserror::Error;

/// Graph error codes that mean "slow down" even when the status is 400
const THROTTLING_CODES: &[i64] = &[4, 80007, 130_429, 131_048, 131_056];
/// Expired or revoked access token
const TOKEN_ERROR_CODE: i64 = 190;

/// A message that did not reach the Cloud API, or that it refused
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
    /// HTTP status, when the Graph API answered at all
    pub status: Option<u16>,
}

#[derive(Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Deserialize)]
struct GraphErrorBody {
    message: String,
    code: Option<i64>,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Build from a non-2xx answer. The body is usually
    /// `{"error": {"message": ..., "code": ...}}`; anything else is kept verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (message, code) = match serde_json::from_str::<GraphErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.message, envelope.error.code),
            Err(_) => (body.to_string(), None),
        };

        Self {
            kind: GatewayErrorKind::classify(status, code),
            message: format!("Graph API {status}: {message}"),
            status: Some(status),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() || e.is_connect() {
            GatewayErrorKind::Network
        } else {
            GatewayErrorKind::Unknown
        };
        Self::new(kind, format!("Request failed: {e}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// No answer: timeout or refused connection
    Network,
    /// 429, or a throttling error code on the business account or recipient
    RateLimit,
    /// 5xx from the Graph API
    ServerError,
    /// 401/403 or token error 190. Needs a new access token.
    Auth,
    /// Any other 4xx, e.g. a malformed list or a recipient outside the test allow list
    InvalidRequest,
    Unknown,
}

impl GatewayErrorKind {
    fn classify(status: u16, code: Option<i64>) -> Self {
        match (status, code) {
            (_, Some(code)) if THROTTLING_CODES.contains(&code) => Self::RateLimit,
            (_, Some(TOKEN_ERROR_CODE)) | (401 | 403, _) => Self::Auth,
            (429, _) => Self::RateLimit,
            (400..=499, _) => Self::InvalidRequest,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Whether resending the same message could succeed
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::RateLimit | Self::ServerError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_graph_message_and_code() {
        let err = GatewayError::from_response(
            400,
            r#"{"error": {"message": "(#131056) Pair rate limit hit", "code": 131056}}"#,
        );
        assert_eq!(err.kind, GatewayErrorKind::RateLimit);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "Graph API 400: (#131056) Pair rate limit hit");
    }

    #[test]
    fn token_error_is_auth_whatever_the_status() {
        let err = GatewayError::from_response(
            400,
            r#"{"error": {"message": "Session has expired", "code": 190}}"#,
        );
        assert_eq!(err.kind, GatewayErrorKind::Auth);
    }

    #[test]
    fn plain_bodies_fall_back_to_status() {
        let cases = [
            (403, GatewayErrorKind::Auth),
            (429, GatewayErrorKind::RateLimit),
            (400, GatewayErrorKind::InvalidRequest),
            (502, GatewayErrorKind::ServerError),
            (302, GatewayErrorKind::Unknown),
        ];
        for (status, kind) in cases {
            let err = GatewayError::from_response(status, "nope");
            assert_eq!(err.kind, kind, "status {status}");
            assert_eq!(err.message, format!("Graph API {status}: nope"));
        }
        assert!(!GatewayErrorKind::InvalidRequest.is_retryable());
        assert!(GatewayErrorKind::RateLimit.is_retryable());
    }
}
