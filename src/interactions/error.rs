//! Interaction client error types

use thiserror::Error;

/// Errors that can occur while talking to the remote interaction service
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Check if this error came back from the service itself rather than
    /// the transport
    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::ApiError { .. })
    }

    /// HTTP status code for service-side errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::ApiError {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "API error 429: quota exceeded");
        assert!(err.is_api());
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn test_invalid_response_has_no_status() {
        let err = ClientError::InvalidResponse("empty body".to_string());
        assert!(!err.is_api());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ClientError = parse_err.into();
        assert!(matches!(err, ClientError::Json(_)));
    }
}
