//! API error type.
//!
//! Cloneable with string payloads so one refresh failure can be handed to
//! every request waiting on it.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure before any response arrived
    #[error("Network error: {0}")]
    Network(String),
    /// 401 that survived (or could not start) a token refresh
    #[error("Authentication failed: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Any other non-2xx status
    #[error("API error ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Storage error: {0}")]
    Storage(String),
    /// The refresh call itself failed; the session has been cleared
    #[error("Session expired: {0}")]
    RefreshFailed(String),
    /// A queued request lost its refresh before hearing back
    #[error("Token refresh was abandoned")]
    RefreshAborted,
}

impl ApiError {
    /// Map a non-success status and its body to an error
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = extract_error_message(body);
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Http { status, message },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::RefreshFailed(_))
    }
}

/// Human-readable message from a JSON error body.
///
/// Tries `message`, then `error`, then falls back to the raw body.
pub fn extract_error_message(body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    String::from_utf8_lossy(body).trim().to_string()
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let body = br#"{"message":"Issue not found"}"#;
        assert_eq!(ApiError::from_status(404, body), ApiError::NotFound("Issue not found".to_string()));
        assert_eq!(
            ApiError::from_status(500, b"boom"),
            ApiError::Http { status: 500, message: "boom".to_string() }
        );
        assert!(ApiError::from_status(401, b"").is_unauthorized());
    }

    #[test]
    fn test_extract_error_field() {
        assert_eq!(extract_error_message(br#"{"error":"bad token"}"#), "bad token");
        assert_eq!(extract_error_message(br#"{"message":"a","error":"b"}"#), "a");
        assert_eq!(extract_error_message(b"  plain text \n"), "plain text");
    }
}
